//! The delimited export format and its reader.
//!
//! One header row, then one row per transaction:
//! `Date,Type,Amount,Category,Description`. The reader accepts what the
//! writer produces, so an exported ledger can be imported elsewhere with
//! direction and category intact.

use chrono::{DateTime, NaiveDate, Utc};

use crate::contracts::types::ImportIssue;
use crate::model::{Amount, Transaction, TransactionKind, parse_raw_amount};
use crate::{ClientError, ClientResult};

pub const EXPORT_FILE_NAME: &str = "expenses.csv";
pub const EXPORT_HEADERS: [&str; 5] = ["Date", "Type", "Amount", "Category", "Description"];

#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    pub row: i64,
    pub date: DateTime<Utc>,
    pub kind: TransactionKind,
    pub magnitude: Amount,
    pub category: String,
    pub text: Option<String>,
}

pub fn write_export(transactions: &[Transaction]) -> ClientResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(EXPORT_HEADERS)
        .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;

    for transaction in transactions {
        let date = transaction.date.format("%Y-%m-%d").to_string();
        let amount = transaction.amount.to_string();
        writer
            .write_record([
                date.as_str(),
                transaction.kind().label(),
                amount.as_str(),
                transaction.category.as_str(),
                transaction.text.as_deref().unwrap_or(""),
            ])
            .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
    String::from_utf8(bytes).map_err(|error| ClientError::internal_serialization(&error.to_string()))
}

/// Parses an export. Every row is checked before anything is returned; a
/// single bad row fails the whole batch with per-row issues attached.
pub fn read_import(content: &str) -> ClientResult<Vec<ImportRow>> {
    if content.trim().is_empty() {
        return Err(invalid_import("Import source is empty."));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| invalid_import("CSV header row is missing or unreadable."))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    if !headers_match(&headers) {
        return Err(ClientError::invalid_argument_with_recovery(
            &format!(
                "CSV headers `{}` do not match the export format.",
                headers.join(",")
            ),
            vec![
                format!("Use exactly these headers: {}.", EXPORT_HEADERS.join(",")),
                "Run `pocketbook export` to see a sample file.".to_string(),
            ],
        ));
    }

    let mut rows = Vec::new();
    let mut issues = Vec::new();
    let mut rows_read = 0_i64;

    for (index, record) in reader.records().enumerate() {
        let row_number = (index as i64) + 1;
        rows_read += 1;
        let record = record.map_err(|_| invalid_import("CSV rows are malformed or not UTF-8."))?;
        let field = |position: usize| record.get(position).map(str::trim).unwrap_or("");

        let date = parse_date(field(0));
        let kind = field(1).parse::<TransactionKind>();
        let magnitude = parse_raw_amount(field(2))
            .ok()
            .and_then(|value| Amount::from_major(value.abs()));

        if date.is_none() {
            issues.push(issue(row_number, "Date", "Date must be YYYY-MM-DD."));
        }
        if kind.is_err() {
            issues.push(issue(row_number, "Type", "Type must be Income or Expense."));
        }
        if magnitude.is_none() {
            issues.push(issue(row_number, "Amount", "Amount must be a finite number."));
        }

        if let (Some(date), Ok(kind), Some(magnitude)) = (date, kind, magnitude) {
            let text = field(4);
            rows.push(ImportRow {
                row: row_number,
                date,
                kind,
                magnitude,
                category: field(3).to_string(),
                text: (!text.is_empty()).then(|| text.to_string()),
            });
        }
    }

    if !issues.is_empty() {
        return Err(ClientError::import_validation_failed(rows_read, issues));
    }

    Ok(rows)
}

fn headers_match(headers: &[String]) -> bool {
    headers.len() == EXPORT_HEADERS.len()
        && headers
            .iter()
            .zip(EXPORT_HEADERS)
            .all(|(actual, expected)| actual.eq_ignore_ascii_case(expected))
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

fn issue(row: i64, field: &str, message: &str) -> ImportIssue {
    ImportIssue {
        row,
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn invalid_import(message: &str) -> ClientError {
    ClientError::invalid_argument_for_command(message, Some("import"))
}
