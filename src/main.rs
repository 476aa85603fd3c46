mod api;
mod check;
mod checksum;
mod cli;
mod commands;
mod config;
mod constants;
mod error;
mod releases;
mod table;
mod ui;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let table = cli.table.as_deref();

    let exit_code = match cli.command {
        Commands::Init { version, force } => commands::init::init(table, version, force).map(|_| 0)?,
        Commands::Reported { json } => commands::reported::reported(table, json).map(|_| 0)?,
        Commands::Accepts { version } => commands::accepts::accepts(table, &version)?,
        Commands::Releases { all, json } => {
            commands::releases::releases(table, all, json).map(|_| 0)?
        }
        Commands::Export => commands::export::export(table).map(|_| 0)?,
        Commands::Check { json } => commands::check::check(table, json)?,
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}
