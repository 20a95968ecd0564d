//! attendlog library root.
//! Exposes the CLI parser, the high-level run() function and the ledger
//! building blocks (stores, period naming, roster).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod roster;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::context::Context;
use cli::parser::{Cli, Commands};
use config::{BackendKind, Config};
use errors::AppResult;
use models::Action;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let open = || Context::open(cli, cfg);

    match &cli.command {
        Commands::Init => commands::init::handle(cli, cfg),
        Commands::Config {
            print_config,
            edit_config,
            editor,
        } => commands::config::handle(cfg, *print_config, *edit_config, editor),
        Commands::In { name, at } => commands::check::handle(&open()?, Action::CheckIn, name, at),
        Commands::Out { name, at } => commands::check::handle(&open()?, Action::CheckOut, name, at),
        Commands::Status { name, segment } => commands::status::handle(&open()?, name, segment),
        Commands::List { segment } => commands::list::handle(&open()?, segment),
        Commands::Segment { all } => commands::segment::handle(&open()?, *all),
        Commands::Roster => commands::roster::handle(&open()?),
        Commands::Log { print } => commands::log::handle(&open()?, *print),
        Commands::Export {
            format,
            file,
            segment,
            force,
        } => commands::export::handle(&open()?, *format, file, segment, *force),
    }
}

/// Apply command-line overrides on top of the loaded configuration.
pub fn apply_overrides(cli: &Cli, cfg: &mut Config) {
    if let Some(backend) = cli.backend {
        cfg.backend = backend;
    }
    if let Some(location) = &cli.db {
        match cfg.backend {
            BackendKind::Sqlite => cfg.database = location.clone(),
            BackendKind::Csv => cfg.data_dir = location.clone(),
        }
    }
    if let Some(period) = cli.period {
        cfg.granularity = period;
    }
    if let Some(roster) = &cli.roster {
        cfg.roster_file = roster.clone();
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    apply_overrides(&cli, &mut cfg);
    cfg.validate()?;

    dispatch(&cli, &cfg)
}
