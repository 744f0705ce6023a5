use pocketbook_client::ClientError;
use serde_json::Value;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        "Something went wrong, but it's easy to fix.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];

    let issues = error
        .data
        .as_ref()
        .and_then(|data| data.get("issues"))
        .and_then(Value::as_array);
    if let Some(issues) = issues.filter(|rows| !rows.is_empty()) {
        lines.push(String::new());
        lines.push("Problems found:".to_string());
        for issue in issues {
            let row = issue.get("row").and_then(Value::as_i64).unwrap_or(0);
            let field = issue.get("field").and_then(Value::as_str).unwrap_or("");
            let message = issue.get("message").and_then(Value::as_str).unwrap_or("");
            lines.push(format!("  row {row} {field}: {message}"));
        }
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use pocketbook_client::ClientError;
    use pocketbook_client::contracts::types::ImportIssue;

    use super::render_error;

    #[test]
    fn renders_standard_error_layout() {
        let error = ClientError::invalid_argument_with_recovery(
            "bad input",
            vec!["run pocketbook --help".to_string()],
        );

        let rendered = render_error(&error);
        assert!(rendered.starts_with("Something went wrong, but it's easy to fix."));
        assert!(rendered.contains("  Error:    invalid_argument"));
        assert!(rendered.contains("  Details:  bad input"));
        assert!(rendered.contains("What to do next:"));
        assert!(rendered.contains("  1. run pocketbook --help"));
        assert!(!rendered.contains("Problems found:"));
    }

    #[test]
    fn lists_import_issues_before_next_steps() {
        let error = ClientError::import_validation_failed(
            2,
            vec![ImportIssue {
                row: 3,
                field: "Amount".to_string(),
                message: "not a number".to_string(),
            }],
        );

        let rendered = render_error(&error);
        assert!(rendered.contains("Problems found:\n  row 3 Amount: not a number"));
        let problems = rendered.find("Problems found:");
        let next = rendered.find("What to do next:");
        assert!(problems < next);
    }
}
