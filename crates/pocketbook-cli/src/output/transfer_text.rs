use std::io;

use serde_json::Value;

use super::format::key_value_rows;

pub fn render_export(data: &Value) -> io::Result<String> {
    if let Some(content) = data.get("content").and_then(Value::as_str) {
        return Ok(content.trim_end_matches('\n').to_string());
    }

    let path = data
        .get("path")
        .and_then(Value::as_str)
        .ok_or_else(|| io::Error::other("export output requires path or content"))?;
    let rows = data.get("rows_written").and_then(Value::as_i64).unwrap_or(0);

    let mut lines = vec![format!("Exported {rows} transactions.")];
    lines.push(String::new());
    lines.extend(key_value_rows(&[("File:", path.to_string())], 2));
    Ok(lines.join("\n"))
}

pub fn render_import(data: &Value) -> io::Result<String> {
    let inserted = data
        .get("inserted")
        .and_then(Value::as_i64)
        .ok_or_else(|| io::Error::other("import output requires inserted"))?;
    let path = data.get("path").and_then(Value::as_str).unwrap_or("-");
    let source = if path == "-" { "stdin" } else { path };

    let mut entries = vec![
        ("Source:", source.to_string()),
        ("Rows read:", data.get("rows_read").and_then(Value::as_i64).unwrap_or(0).to_string()),
        ("Inserted:", inserted.to_string()),
    ];
    let first = data.get("first_id").and_then(Value::as_u64);
    let last = data.get("last_id").and_then(Value::as_u64);
    if let (Some(first), Some(last)) = (first, last) {
        entries.push(("IDs:", format!("#{first} to #{last}")));
    }

    let mut lines = vec!["Import complete.".to_string(), String::new()];
    lines.extend(key_value_rows(&entries, 2));
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{render_export, render_import};

    #[test]
    fn inline_export_prints_csv_only() {
        let rendered = render_export(&json!({
            "path": null,
            "rows_written": 1,
            "content": "Date,Type,Amount,Category,Description\n2026-01-02,Expense,-5.00,Food,\n"
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Date,Type,Amount,Category,Description"));
            assert!(!text.ends_with('\n'));
        }
    }

    #[test]
    fn file_export_reports_path() {
        let rendered = render_export(&json!({"path": "expenses.csv", "rows_written": 3}));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Exported 3 transactions."));
            assert!(text.contains("  File:  expenses.csv"));
        }
    }

    #[test]
    fn import_reports_id_range() {
        let rendered = render_import(&json!({
            "path": "-",
            "rows_read": 2,
            "inserted": 2,
            "first_id": 4,
            "last_id": 5
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("Source:     stdin"));
            assert!(text.contains("IDs:        #4 to #5"));
        }
    }
}
