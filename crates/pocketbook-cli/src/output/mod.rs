mod error_text;
mod format;
mod json;
mod ledger_text;
mod mode;
mod report_text;
mod transfer_text;

use std::io;

use pocketbook_client::{ClientError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "add" => ledger_text::render_add(&success.data),
        "remove" => ledger_text::render_remove(&success.data),
        "list" => ledger_text::render_list(&success.data),
        "summary" => ledger_text::render_summary(&success.data),
        "monthly" => report_text::render_monthly(&success.data),
        "years" => report_text::render_years(&success.data),
        "dash" => report_text::render_dash(&success.data),
        "export" => transfer_text::render_export(&success.data),
        "import" => transfer_text::render_import(&success.data),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}
