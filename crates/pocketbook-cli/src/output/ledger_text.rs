use std::io;

use serde_json::Value;

use super::format::{Align, Column, amount_of, key_value_rows, plain_amount, render_table, str_field};

pub fn render_add(data: &Value) -> io::Result<String> {
    let transaction = data
        .get("transaction")
        .ok_or_else(|| io::Error::other("add output requires transaction"))?;

    let mut lines = vec![format!(
        "Added {} #{}: {} {}",
        kind_label(transaction).to_lowercase(),
        transaction.get("id").and_then(Value::as_u64).unwrap_or(0),
        plain_amount(amount_of(transaction.get("amount"))),
        str_field(transaction, "category"),
    )];
    lines.push(String::new());
    lines.extend(render_totals(data.get("totals")));
    Ok(lines.join("\n"))
}

pub fn render_remove(data: &Value) -> io::Result<String> {
    let id = data.get("id").and_then(Value::as_u64).unwrap_or(0);
    let mut lines = match data.get("removed").filter(|value| !value.is_null()) {
        Some(removed) => vec![format!(
            "Removed #{id}: {} {}",
            plain_amount(amount_of(removed.get("amount"))),
            str_field(removed, "category"),
        )],
        None => vec![format!("No transaction #{id}; nothing removed.")],
    };
    lines.push(String::new());
    lines.extend(render_totals(data.get("totals")));
    Ok(lines.join("\n"))
}

pub fn render_list(data: &Value) -> io::Result<String> {
    let rows = data
        .get("transactions")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("list output requires transactions"))?;

    let mut lines = render_transactions(rows);
    lines.push(String::new());
    lines.extend(render_totals(data.get("totals")));
    Ok(lines.join("\n"))
}

pub fn render_summary(data: &Value) -> io::Result<String> {
    if data.get("display").is_none() {
        return Err(io::Error::other("summary output requires display"));
    }
    Ok(render_totals(Some(data)).join("\n"))
}

pub(super) fn render_transactions(rows: &[Value]) -> Vec<String> {
    if rows.is_empty() {
        return vec![
            "No transactions yet.".to_string(),
            "  Add one with `pocketbook add <amount> --type expense --category Food`.".to_string(),
        ];
    }

    let columns = [
        Column {
            name: "ID",
            align: Align::Right,
        },
        Column {
            name: "Date",
            align: Align::Left,
        },
        Column {
            name: "Type",
            align: Align::Left,
        },
        Column {
            name: "Category",
            align: Align::Left,
        },
        Column {
            name: "Amount",
            align: Align::Right,
        },
        Column {
            name: "Description",
            align: Align::Left,
        },
    ];
    let cells = rows
        .iter()
        .map(|row| {
            vec![
                row.get("id")
                    .and_then(Value::as_u64)
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
                day_of(str_field(row, "date")).to_string(),
                kind_label(row).to_string(),
                str_field(row, "category").to_string(),
                plain_amount(amount_of(row.get("amount"))),
                str_field(row, "text").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![format!("Transactions ({}):", rows.len())];
    lines.extend(render_table(&columns, &cells));
    lines
}

/// Balance, income, and expense lines from a `SummaryData` payload.
pub(super) fn render_totals(totals: Option<&Value>) -> Vec<String> {
    let display = totals.and_then(|value| value.get("display"));
    let field = |key: &str| {
        display
            .and_then(|value| value.get(key))
            .and_then(Value::as_str)
            .unwrap_or("$0.00")
            .to_string()
    };

    key_value_rows(
        &[
            ("Balance:", field("balance")),
            ("Income:", field("income")),
            ("Expense:", field("expense")),
        ],
        2,
    )
}

fn kind_label(transaction: &Value) -> &'static str {
    if amount_of(transaction.get("amount")) < 0.0 {
        "Expense"
    } else {
        "Income"
    }
}

fn day_of(timestamp: &str) -> &str {
    timestamp.get(..10).unwrap_or(timestamp)
}
