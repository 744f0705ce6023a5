use std::io;

use serde_json::Value;

use super::format::{Align, Column, amount_of, bar, money, render_table, str_field};
use super::ledger_text::{render_totals, render_transactions};

const BAR_WIDTH: usize = 30;
const INCOME_FILL: char = '#';
const EXPENSE_FILL: char = '=';

pub fn render_monthly(data: &Value) -> io::Result<String> {
    let buckets = data
        .get("buckets")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("monthly output requires buckets"))?;

    let heading = match data.get("year").and_then(Value::as_i64) {
        Some(year) => format!("Monthly totals for {year}:"),
        None => "Monthly totals, all months:".to_string(),
    };
    if buckets.is_empty() {
        return Ok([heading, "  No transactions yet.".to_string()].join("\n"));
    }

    let columns = [
        Column {
            name: "Month",
            align: Align::Left,
        },
        Column {
            name: "Income",
            align: Align::Right,
        },
        Column {
            name: "Expense",
            align: Align::Right,
        },
        Column {
            name: "Net",
            align: Align::Right,
        },
    ];
    let rows = buckets
        .iter()
        .map(|bucket| {
            let income = amount_of(bucket.get("income"));
            let expense = amount_of(bucket.get("expense"));
            vec![
                str_field(bucket, "month_label").to_string(),
                money(income),
                money(expense),
                money(income - expense),
            ]
        })
        .collect::<Vec<Vec<String>>>();

    let mut lines = vec![heading];
    lines.extend(render_table(&columns, &rows));
    Ok(lines.join("\n"))
}

pub fn render_years(data: &Value) -> io::Result<String> {
    let years = data
        .get("years")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("years output requires years"))?;

    if years.is_empty() {
        return Ok("No years on record yet.".to_string());
    }
    let mut lines = vec!["Years with transactions:".to_string()];
    lines.extend(
        years
            .iter()
            .filter_map(Value::as_i64)
            .map(|year| format!("  {year}")),
    );
    Ok(lines.join("\n"))
}

pub fn render_dash(data: &Value) -> io::Result<String> {
    let chart = data
        .get("chart")
        .ok_or_else(|| io::Error::other("dash output requires chart"))?;
    let transactions = data
        .get("transactions")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut lines = render_transactions(&transactions);
    lines.push(String::new());
    lines.extend(render_totals(data.get("totals")));
    lines.push(String::new());
    lines.push(render_year_picker(data));
    lines.push(String::new());
    lines.extend(render_chart(chart));
    Ok(lines.join("\n"))
}

fn render_year_picker(data: &Value) -> String {
    let selected = data.get("selected_year").and_then(Value::as_i64);
    let years = data
        .get("years")
        .and_then(Value::as_array)
        .map(|values| values.iter().filter_map(Value::as_i64).collect::<Vec<i64>>())
        .unwrap_or_default();

    let options = if years.is_empty() {
        selected.map(|year| format!("[{year}]")).unwrap_or_default()
    } else {
        years
            .iter()
            .map(|year| {
                if Some(*year) == selected {
                    format!("[{year}]")
                } else {
                    year.to_string()
                }
            })
            .collect::<Vec<String>>()
            .join("  ")
    };
    format!("Year:  {options}")
}

/// Grouped horizontal bars, one income and one expense line per month, all
/// scaled against the largest value in the chart.
fn render_chart(chart: &Value) -> Vec<String> {
    let labels = chart
        .get("labels")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let series = chart
        .get("series")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    let values_at = |series_index: usize, month: usize| {
        series
            .get(series_index)
            .and_then(|entry| entry.get("values"))
            .and_then(|values| values.get(month))
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    };

    let peak = (0..labels.len())
        .flat_map(|month| [values_at(0, month), values_at(1, month)])
        .fold(0.0_f64, f64::max);

    let mut lines = vec![chart
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or("Monthly Overview")
        .to_string()];
    let legend = series
        .iter()
        .zip([INCOME_FILL, EXPENSE_FILL])
        .map(|(entry, fill)| format!("{fill} {}", str_field(entry, "label")))
        .collect::<Vec<String>>()
        .join("   ");
    lines.push(format!("  {legend}"));

    if peak <= 0.0 {
        lines.push("  No activity this year.".to_string());
        return lines;
    }

    for (month, label) in labels.iter().enumerate() {
        let label = label.as_str().unwrap_or("");
        let income = values_at(0, month);
        let expense = values_at(1, month);
        lines.push(chart_line(label, income, peak, INCOME_FILL));
        lines.push(chart_line("", expense, peak, EXPENSE_FILL));
    }
    lines
}

fn chart_line(label: &str, value: f64, peak: f64, fill: char) -> String {
    let drawn = bar(value, peak, BAR_WIDTH, fill);
    let line = if value > 0.0 {
        format!("  {label:<4}{drawn:<BAR_WIDTH$}  {}", money(value))
    } else {
        format!("  {label:<4}")
    };
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::{render_dash, render_monthly, render_years};

    fn chart(income_march: f64, expense_march: f64) -> Value {
        let mut income = vec![0.0; 12];
        let mut expense = vec![0.0; 12];
        income[2] = income_march;
        expense[2] = expense_march;
        json!({
            "title": "Monthly Overview - 2024",
            "labels": ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"],
            "series": [
                {"label": "Income", "color": "#708238", "values": income},
                {"label": "Expense", "color": "#000000", "values": expense}
            ]
        })
    }

    #[test]
    fn monthly_renders_every_bucket_with_net() {
        let rendered = render_monthly(&json!({
            "year": 2024,
            "buckets": [
                {"month_label": "Jan", "income": 0.0, "expense": 0.0},
                {"month_label": "Feb", "income": 1000.0, "expense": 250.0}
            ]
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Monthly totals for 2024:"));
            assert!(text.contains("$1000.00"));
            assert!(text.contains("$750.00"));
        }
    }

    #[test]
    fn monthly_history_without_rows_says_so() {
        let rendered = render_monthly(&json!({"year": null, "buckets": []}));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("all months"));
            assert!(text.contains("No transactions yet."));
        }
    }

    #[test]
    fn years_list_one_per_line() {
        let rendered = render_years(&json!({"years": [2025, 2023]}));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert_eq!(text, "Years with transactions:\n  2025\n  2023");
        }
    }

    #[test]
    fn dash_marks_selected_year_and_scales_bars() {
        let rendered = render_dash(&json!({
            "transactions": [],
            "totals": {"display": {"balance": "$750.00", "income": "+$1000.00", "expense": "-$250.00"}},
            "years": [2025, 2024],
            "selected_year": 2024,
            "chart": chart(1000.0, 250.0),
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("Year:  2025  [2024]"));
            assert!(text.contains("Monthly Overview - 2024"));
            assert!(text.contains(&format!("  Mar {}  $1000.00", "#".repeat(30))));
            assert!(text.contains(&format!("      {}", "=".repeat(8))));
        }
    }

    #[test]
    fn dash_with_empty_year_shows_no_activity() {
        let rendered = render_dash(&json!({
            "transactions": [],
            "totals": {},
            "years": [],
            "selected_year": 2026,
            "chart": chart(0.0, 0.0),
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("Year:  [2026]"));
            assert!(text.contains("No activity this year."));
        }
    }
}
