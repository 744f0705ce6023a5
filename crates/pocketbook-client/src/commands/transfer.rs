use std::fs;
use std::io::Read;
use std::path::Path;

use crate::contracts::envelope::SuccessEnvelope;
use crate::contracts::types::{ExportData, ImportData};
use crate::ledger_csv::EXPORT_FILE_NAME;
use crate::session::{DashboardCapture, Session};
use crate::setup::open_store;
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
pub struct ExportOptions<'a> {
    /// Destination file. `-` returns the content inline; `None` writes
    /// `expenses.csv` in the working directory.
    pub output: Option<String>,
    pub home_override: Option<&'a Path>,
}

#[derive(Debug, Default)]
pub struct ImportOptions<'a> {
    /// Source file, or `-` for stdin.
    pub path: String,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

pub fn export(output: Option<String>) -> ClientResult<SuccessEnvelope> {
    export_with_options(ExportOptions {
        output,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn export_with_options(options: ExportOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let (_, store) = open_store(options.home_override)?;
    let content = store.export_csv()?;
    let rows_written = store.transactions().len() as i64;

    let target = options
        .output
        .unwrap_or_else(|| EXPORT_FILE_NAME.to_string());
    if target == "-" {
        return SuccessEnvelope::new(
            "export",
            ExportData {
                path: None,
                rows_written,
                content: Some(content),
            },
        );
    }

    fs::write(&target, content).map_err(|error| {
        ClientError::invalid_argument_with_recovery(
            &format!("Could not write export file `{target}`: {error}"),
            vec![
                "Check that the directory exists and is writable.".to_string(),
                "Pass `--output -` to print the CSV instead.".to_string(),
            ],
        )
    })?;
    tracing::info!(path = %target, rows_written, "exported ledger");

    SuccessEnvelope::new(
        "export",
        ExportData {
            path: Some(target),
            rows_written,
            content: None,
        },
    )
}

pub fn import(path: &str) -> ClientResult<SuccessEnvelope> {
    import_with_options(ImportOptions {
        path: path.to_string(),
        home_override: None,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn import_with_options(options: ImportOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let content = read_source(&options.path, options.stdin_override)?;

    let (_, store) = open_store(options.home_override)?;
    let mut session = Session::open(store, DashboardCapture::default());
    let inserted = session.import_csv(&content)?;

    let data = ImportData {
        path: options.path,
        rows_read: inserted.len() as i64,
        inserted: inserted.len() as i64,
        first_id: inserted.first().map(|transaction| transaction.id),
        last_id: inserted.last().map(|transaction| transaction.id),
    };
    SuccessEnvelope::new("import", data)
}

fn read_source(path: &str, stdin_override: Option<String>) -> ClientResult<String> {
    if path == "-" {
        let body = match stdin_override {
            Some(body) => body,
            None => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .map_err(|error| {
                        ClientError::invalid_argument_for_command(
                            &format!("Could not read stdin: {error}"),
                            Some("import"),
                        )
                    })?;
                buffer
            }
        };
        if body.trim().is_empty() {
            return Err(ClientError::invalid_argument_for_command(
                "Path `-` means stdin input, but stdin was empty. Pipe CSV input or pass a file path.",
                Some("import"),
            ));
        }
        return Ok(body);
    }

    fs::read_to_string(path).map_err(|error| {
        ClientError::invalid_argument_with_recovery(
            &format!("Could not read import file `{path}`: {error}"),
            vec![
                "Verify the path exists and is readable.".to_string(),
                "Rerun pocketbook import <path>.".to_string(),
            ],
        )
    })
}
