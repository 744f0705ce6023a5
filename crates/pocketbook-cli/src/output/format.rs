use std::cmp;

use serde_json::Value;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }

    let label_width = entries
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Renders a header row followed by one line per row. Columns size to their
/// widest cell; nothing is wrapped or truncated.
pub fn render_table(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let mut widths = columns
        .iter()
        .map(|column| column.name.chars().count())
        .collect::<Vec<usize>>();
    for row in rows {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, value.chars().count());
            }
        }
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    let mut output = vec![format_row(columns, &header, &widths)];
    for row in rows {
        output.push(format_row(columns, row, &widths));
    }
    output
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let pieces = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let width = widths.get(index).copied().unwrap_or(0);
            let value = cells.get(index).map(String::as_str).unwrap_or("");
            match column.align {
                Align::Left => format!("{value:<width$}"),
                Align::Right => format!("{value:>width$}"),
            }
        })
        .collect::<Vec<String>>();

    let line = format!(
        "{}{}",
        " ".repeat(INDENT),
        pieces.join(&" ".repeat(COLUMN_GAP))
    );
    line.trim_end().to_string()
}

pub fn amount_of(value: Option<&Value>) -> f64 {
    value.and_then(Value::as_f64).unwrap_or(0.0)
}

/// `-250.05` style, as stored.
pub fn plain_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// `$750.00` or `-$42.15`.
pub fn money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${amount:.2}")
    }
}

/// A bar of `width` cells at full `peak`. Non-zero values always get at
/// least one cell so small months stay visible.
pub fn bar(value: f64, peak: f64, width: usize, fill: char) -> String {
    if value <= 0.0 || peak <= 0.0 || width == 0 {
        return String::new();
    }
    let scaled = ((value / peak) * width as f64).round() as usize;
    let cells = scaled.clamp(1, width);
    std::iter::repeat_n(fill, cells).collect()
}

pub fn str_field<'a>(row: &'a Value, key: &str) -> &'a str {
    row.get(key).and_then(Value::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::{Align, Column, bar, key_value_rows, money, render_table};

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(
            &[
                ("Balance:", "$750.00".to_string()),
                ("Income:", "+$1000.00".to_string()),
            ],
            2,
        );

        assert_eq!(rows[0], "  Balance:  $750.00");
        assert_eq!(rows[1], "  Income:   +$1000.00");
    }

    #[test]
    fn table_pads_to_widest_cell() {
        let columns = [
            Column {
                name: "Category",
                align: Align::Left,
            },
            Column {
                name: "Amount",
                align: Align::Right,
            },
        ];
        let rows = vec![
            vec!["Entertainment".to_string(), "-19.99".to_string()],
            vec!["Food".to_string(), "-1250.00".to_string()],
        ];

        let rendered = render_table(&columns, &rows);
        assert_eq!(rendered[0], "  Category         Amount");
        assert_eq!(rendered[1], "  Entertainment    -19.99");
        assert_eq!(rendered[2], "  Food           -1250.00");
    }

    #[test]
    fn money_places_sign_before_currency() {
        assert_eq!(money(750.0), "$750.00");
        assert_eq!(money(-42.15), "-$42.15");
        assert_eq!(money(0.0), "$0.00");
    }

    #[test]
    fn bar_scales_against_peak() {
        assert_eq!(bar(100.0, 100.0, 10, '#'), "##########");
        assert_eq!(bar(50.0, 100.0, 10, '#'), "#####");
        assert_eq!(bar(0.01, 100.0, 10, '#'), "#");
        assert_eq!(bar(0.0, 100.0, 10, '#'), "");
        assert_eq!(bar(5.0, 0.0, 10, '#'), "");
    }
}
