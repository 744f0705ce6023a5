use pocketbook_client::commands;
use pocketbook_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Add {
            amount,
            kind,
            category,
            text,
            date,
            ..
        } => commands::ledger::add(amount, *kind, category, text.clone(), *date),
        Commands::Remove { id, .. } => commands::ledger::remove(*id),
        Commands::List { .. } => commands::ledger::list(),
        Commands::Summary { .. } => commands::report::summary(),
        Commands::Monthly { year, all, .. } => commands::report::monthly(*year, *all),
        Commands::Years { .. } => commands::report::years(),
        Commands::Dash { year, .. } => commands::report::dash(*year),
        Commands::Export { output, .. } => commands::transfer::export(output.clone()),
        Commands::Import { path, .. } => commands::transfer::import(path),
    }
}
