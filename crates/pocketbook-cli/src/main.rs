mod cli;
mod dispatch;
mod logging;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use pocketbook_client::ClientError;
use stdout_io::write_stdout_text;

const ROOT_HELP: &str = "Pocketbook - personal income and expense tracker

Usage:
  pocketbook <command>

Start here:
  pocketbook add --help
  pocketbook dash
";

const TOP_LEVEL_HELP: &str = "Pocketbook - personal income and expense tracker

USAGE: pocketbook <command>

Record money in and out:
  pocketbook add 1000 --type income --category Salary     Record income
  pocketbook add 12.50 --type expense --category Food     Record an expense
  pocketbook remove <id>                                  Delete a transaction
  pocketbook list                                         Show every transaction

See where it went:
  pocketbook summary                                      Balance, income, and expense totals
  pocketbook monthly [--year <year> | --all]              Income and expense per month
  pocketbook years                                        Years with transactions
  pocketbook dash [--year <year>]                         Transactions, totals, and monthly chart

Move data in and out:
  pocketbook export [--output <path>]                     Write expenses.csv (`-` prints it)
  pocketbook import <path>                                Add rows from an exported CSV

Add --json to any command for machine-readable output.
The ledger lives in ~/.pocketbook; set POCKETBOOK_HOME to use another directory.
Set POCKETBOOK_LOG=debug to see diagnostics on stderr.
";

fn main() -> ExitCode {
    logging::init();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }
    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => {
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) {
                let text = if is_top_level_help_request(&raw_args) {
                    TOP_LEVEL_HELP.to_string()
                } else {
                    err.to_string()
                };
                if write_stdout_text(&text).is_err() {
                    return Err(ExitCode::from(2));
                }
                return Ok(ExitCode::SUCCESS);
            }
            let command_hint = if matches!(
                err.kind(),
                ErrorKind::MissingRequiredArgument
                    | ErrorKind::InvalidValue
                    | ErrorKind::ValueValidation
                    | ErrorKind::WrongNumberOfValues
                    | ErrorKind::UnknownArgument
                    | ErrorKind::ArgumentConflict
            ) {
                command_path_from_args(&raw_args)
            } else {
                None
            };
            let clean_message = strip_clap_boilerplate(&err.to_string());
            let parse_error =
                ClientError::invalid_argument_for_command(&clean_message, command_hint.as_deref());
            let mode = infer_requested_output_mode(&raw_args);
            if output::print_failure(&parse_error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            return Err(ExitCode::from(1));
        }
    };
    let mode = output::mode_for_command(&cli.command);
    tracing::debug!(?mode, "dispatching command");

    match dispatch::dispatch(&cli) {
        Ok(success) => {
            if output::print_success(&success, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            if error.is_internal() {
                tracing::error!(code = %error.code, message = %error.message, "command failed");
            }
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Drops clap's Usage line and "For more information" hint; the
/// "What to do next" section carries the guidance instead.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

fn command_path_from_args(raw_args: &[String]) -> Option<String> {
    let command = raw_args
        .iter()
        .skip(1)
        .find(|value| !value.starts_with('-'))?;

    let known = [
        "add", "remove", "list", "summary", "monthly", "years", "dash", "export", "import",
    ];
    known
        .iter()
        .find(|name| **name == command.as_str())
        .map(|name| (*name).to_string())
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if error.is_internal() {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

#[cfg(test)]
mod tests {
    use super::{command_path_from_args, strip_clap_boilerplate};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn command_hint_uses_first_known_subcommand() {
        assert_eq!(
            command_path_from_args(&args(&["pocketbook", "add", "5", "--type"])),
            Some("add".to_string())
        );
        assert_eq!(
            command_path_from_args(&args(&["pocketbook", "--json", "monthly"])),
            Some("monthly".to_string())
        );
        assert_eq!(command_path_from_args(&args(&["pocketbook", "budget"])), None);
    }

    #[test]
    fn clap_usage_block_is_removed() {
        let message = "error: unexpected argument '--x' found\n\nUsage: pocketbook list [OPTIONS]\n\nFor more information, try '--help'.\n";
        assert_eq!(
            strip_clap_boilerplate(message),
            "error: unexpected argument '--x' found"
        );
    }
}
