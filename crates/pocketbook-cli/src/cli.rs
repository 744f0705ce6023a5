use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use pocketbook_client::TransactionKind;

pub fn parse_iso_date(value: &str) -> Result<NaiveDate, String> {
    if value.len() != 10 {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return Err("date must use YYYY-MM-DD format".to_string());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| "date must use valid calendar values".to_string())
}

pub fn parse_kind(value: &str) -> Result<TransactionKind, String> {
    value
        .parse::<TransactionKind>()
        .map_err(|_| "type must be one of: income, expense".to_string())
}

pub fn parse_year(value: &str) -> Result<i32, String> {
    match value.parse::<i32>() {
        Ok(year) if (1..=9999).contains(&year) => Ok(year),
        _ => Err("year must be a four-digit calendar year".to_string()),
    }
}

/// Extended help shown after `pocketbook add --help`.
pub const ADD_AFTER_HELP: &str = "\
Amount rules:
  Enter the amount as a plain number, for example `42.15`.
  The sign comes from --type: expenses are stored negative, income positive.
  A leading minus on the amount is ignored.
  Amounts are kept to the cent; extra decimals are rounded.

Suggested categories:
  Salary, Food, Transport, Shopping, Bills, Entertainment, Other

Examples:
  pocketbook add 1000 --type income --category Salary
  pocketbook add 12.50 --type expense --category Food --text \"lunch\"
  pocketbook add 80 --type expense --category Bills --date 2026-01-31
";

/// Extended help shown after `pocketbook import --help`.
pub const IMPORT_AFTER_HELP: &str = "\
Import format:
  The same CSV that `pocketbook export` writes. One header row:
    Date,Type,Amount,Category,Description

  Date         YYYY-MM-DD
  Type         Income or Expense (decides the sign)
  Amount       A number; its sign is ignored
  Category     Free text
  Description  Optional free text

  Every row is checked first. If any row is invalid, nothing is imported.
  Use `-` as the path to read from stdin.
";

#[derive(Debug, Parser)]
#[command(
    name = "pocketbook",
    version,
    about = "personal income and expense tracker",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record an income or expense transaction
    #[command(after_help = ADD_AFTER_HELP)]
    Add {
        /// Amount as a plain number (the sign comes from --type)
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Direction of money: income or expense
        #[arg(long = "type", value_parser = parse_kind)]
        kind: TransactionKind,
        /// Category label
        #[arg(long)]
        category: String,
        /// Optional description
        #[arg(long)]
        text: Option<String>,
        /// Book on this day (YYYY-MM-DD) instead of now
        #[arg(long, value_parser = parse_iso_date)]
        date: Option<NaiveDate>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a transaction by id
    Remove {
        /// Transaction id, as shown by `pocketbook list`
        id: u64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every transaction with running totals
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show balance, income, and expense totals
    Summary {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show income and expense per month
    Monthly {
        /// Calendar year (defaults to the newest year on record)
        #[arg(long, value_parser = parse_year)]
        year: Option<i32>,
        /// List every month ever recorded instead of one year
        #[arg(long, conflicts_with = "year")]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the years that have transactions
    Years {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show transactions, totals, and the monthly chart together
    Dash {
        /// Calendar year for the chart (defaults to the newest year on record)
        #[arg(long, value_parser = parse_year)]
        year: Option<i32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write all transactions as CSV (expenses.csv by default)
    Export {
        /// Destination path; `-` prints to stdout
        #[arg(long, short)]
        output: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add transactions from a CSV produced by `pocketbook export`
    #[command(after_help = IMPORT_AFTER_HELP)]
    Import {
        /// CSV file path, or `-` for stdin
        path: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}

#[cfg(test)]
mod tests {
    use clap::error::ErrorKind;
    use pocketbook_client::TransactionKind;

    use super::{Commands, parse_from, parse_iso_date, parse_year};

    #[test]
    fn parse_add_with_all_flags() {
        let parsed = parse_from([
            "pocketbook",
            "add",
            "12.50",
            "--type",
            "expense",
            "--category",
            "Food",
            "--text",
            "lunch",
            "--date",
            "2026-01-31",
            "--json",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            match cli.command {
                Commands::Add {
                    amount,
                    kind,
                    category,
                    text,
                    date,
                    json,
                } => {
                    assert_eq!(amount, "12.50");
                    assert_eq!(kind, TransactionKind::Expense);
                    assert_eq!(category, "Food");
                    assert_eq!(text.as_deref(), Some("lunch"));
                    assert_eq!(date.map(|value| value.to_string()).as_deref(), Some("2026-01-31"));
                    assert!(json);
                }
                _ => panic!("expected add command"),
            }
        }
    }

    #[test]
    fn add_accepts_leading_minus_and_text_amounts() {
        let negative = parse_from([
            "pocketbook", "add", "-5", "--type", "income", "--category", "Other",
        ]);
        assert!(negative.is_ok());

        let text = parse_from([
            "pocketbook", "add", "ten", "--type", "income", "--category", "Other",
        ]);
        assert!(text.is_ok());
    }

    #[test]
    fn add_requires_type_and_category() {
        let missing_type = parse_from(["pocketbook", "add", "5", "--category", "Food"]);
        assert!(missing_type.is_err());
        if let Err(err) = missing_type {
            assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        }

        let bad_type = parse_from([
            "pocketbook", "add", "5", "--type", "transfer", "--category", "Food",
        ]);
        assert!(bad_type.is_err());
    }

    #[test]
    fn parse_command_paths() {
        let cases: [&[&str]; 9] = [
            &["pocketbook", "remove", "3"],
            &["pocketbook", "list"],
            &["pocketbook", "summary", "--json"],
            &["pocketbook", "monthly", "--year", "2025"],
            &["pocketbook", "monthly", "--all"],
            &["pocketbook", "years"],
            &["pocketbook", "dash", "--year", "2024"],
            &["pocketbook", "export", "-o", "-"],
            &["pocketbook", "import", "rows.csv"],
        ];
        for args in cases {
            assert!(parse_from(args).is_ok(), "failed to parse {args:?}");
        }
    }

    #[test]
    fn monthly_year_and_all_conflict() {
        let parsed = parse_from(["pocketbook", "monthly", "--year", "2025", "--all"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn remove_requires_numeric_id() {
        assert!(parse_from(["pocketbook", "remove", "abc"]).is_err());
    }

    #[test]
    fn invalid_date_is_rejected() {
        assert!(parse_iso_date("2026-02-30").is_err());
        assert!(parse_iso_date("2026/02/01").is_err());
        assert!(parse_iso_date("2026-02-01").is_ok());
    }

    #[test]
    fn year_must_be_in_calendar_range() {
        assert_eq!(parse_year("2025"), Ok(2025));
        assert!(parse_year("0").is_err());
        assert!(parse_year("twenty").is_err());
    }

    #[test]
    fn help_command_is_rejected() {
        let parsed = parse_from(["pocketbook", "help"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn add_help_uses_clap_display_help() {
        let parsed = parse_from(["pocketbook", "add", "--help"]);
        assert!(parsed.is_err());
        if let Err(err) = parsed {
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        }
    }
}
