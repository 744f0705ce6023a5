use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::ImportIssue;

pub(crate) const ADD_HELP_COMMAND: &str = "pocketbook add --help";
pub(crate) const IMPORT_HELP_COMMAND: &str = "pocketbook import --help";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `pocketbook {cmd} --help` for usage."),
            None => "Run `pocketbook --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn invalid_amount(raw: &str) -> Self {
        Self::new(
            "invalid_amount",
            &format!("Amount `{raw}` is not a valid number."),
            vec![
                "Enter the amount as a plain number, for example `42.15`.".to_string(),
                "Choose income or expense with `--type`; do not sign the amount.".to_string(),
                format!("Run `{ADD_HELP_COMMAND}` for usage."),
            ],
        )
        .with_data(json!({
            "received": raw,
        }))
    }

    pub fn amount_exceeds_ledger_limit(amount: &str) -> Self {
        Self::new(
            "invalid_amount",
            &format!(
                "Adding `{amount}` would push ledger totals past the largest amount Pocketbook can store."
            ),
            vec![
                "Check the amount for extra digits.".to_string(),
                "Keep very large balances in a separate ledger with `POCKETBOOK_HOME`.".to_string(),
            ],
        )
        .with_data(json!({
            "received": amount,
        }))
    }

    pub fn import_validation_failed(rows_read: i64, issues: Vec<ImportIssue>) -> Self {
        let issue_count = issues.len();
        Self::new(
            "import_validation_failed",
            &format!(
                "Import failed validation: {issue_count} of {rows_read} rows need fixes. No rows were written."
            ),
            vec![
                "Fix the listed issues in your source file.".to_string(),
                "Rerun pocketbook import <path>.".to_string(),
                format!("Run `{IMPORT_HELP_COMMAND}` to review the expected columns."),
            ],
        )
        .with_data(json!({
            "rows_read": rows_read,
            "issues": issues,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }

    pub fn ledger_init_permission_denied(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_init_permission_denied",
            &format!("Cannot initialize ledger at `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `POCKETBOOK_HOME` to a writable directory."
            )],
        )
    }

    pub fn ledger_locked(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_locked",
            &format!("Ledger database is locked at `{location}`."),
            vec![format!(
                "Close other processes using `{location}` so the lock is released."
            )],
        )
    }

    pub fn ledger_corrupt(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_corrupt",
            &format!("Ledger database appears corrupt at `{location}`."),
            vec![format!(
                "Replace `{location}` with a valid SQLite ledger file or restore from backup."
            )],
        )
    }

    pub fn migration_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "migration_failed",
            &format!("Ledger migration failed at `{location}`: {detail}"),
            vec!["Move the ledger file aside and rerun the command to start fresh.".to_string()],
        )
    }

    pub fn ledger_init_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "ledger_init_failed",
            &format!("Ledger initialization failed at `{location}`: {detail}"),
            Vec::new(),
        )
    }

    pub fn is_internal(&self) -> bool {
        self.code.starts_with("internal_")
            || matches!(
                self.code.as_str(),
                "ledger_init_permission_denied"
                    | "ledger_locked"
                    | "ledger_corrupt"
                    | "migration_failed"
                    | "ledger_init_failed"
            )
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::ClientError;

    #[test]
    fn invalid_amount_carries_received_value() {
        let error = ClientError::invalid_amount("abc");
        assert_eq!(error.code, "invalid_amount");
        assert!(error.message.contains("abc"));
        assert!(!error.is_internal());
        let received = error
            .data
            .as_ref()
            .and_then(|data| data.get("received"))
            .and_then(|value| value.as_str());
        assert_eq!(received, Some("abc"));
    }

    #[test]
    fn ledger_limit_is_a_user_error() {
        let error = ClientError::amount_exceeds_ledger_limit("89000000000000.00");
        assert_eq!(error.code, "invalid_amount");
        assert!(!error.is_internal());
        assert!(error.message.contains("89000000000000.00"));
    }

    #[test]
    fn storage_errors_are_internal() {
        let error = ClientError::ledger_locked(std::path::Path::new("/tmp/ledger.db"));
        assert!(error.is_internal());
        assert!(ClientError::internal_serialization("boom").is_internal());
    }
}
