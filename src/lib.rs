//! projectflow library root.
//! Exposes the CLI parser, the high-level run() function and the timeline,
//! expiry and deadline alert engine.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod import;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::clock::{Clock, FixedClock, SystemClock};
use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_datetime;
use std::sync::Arc;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, clock: Arc<dyn Clock>) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Import { .. } => cli::commands::import::handle(&cli.command, cfg, clock),
        Commands::Stats => cli::commands::stats::handle(cfg, clock.as_ref()),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg, clock.as_ref()),
        Commands::Timeline { .. } => {
            cli::commands::timeline::handle(&cli.command, cfg, clock.as_ref())
        }
        Commands::Alerts { .. } => cli::commands::alerts::handle(&cli.command, cfg, clock),
        Commands::Template { .. } => {
            cli::commands::template::handle(&cli.command, cfg, clock.as_ref())
        }
        Commands::Email { .. } => cli::commands::email::handle(&cli.command, cfg),
        Commands::Call { .. } => cli::commands::call::handle(&cli.command, cfg, clock.as_ref()),
        Commands::Calls { .. } => cli::commands::calls::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg, clock.as_ref()),
    }
}

/// `--now` pins the clock; otherwise the wall clock is used.
pub fn clock_from_cli(cli: &Cli) -> AppResult<Arc<dyn Clock>> {
    match &cli.now {
        Some(raw) => {
            let at = parse_datetime(raw).ok_or_else(|| AppError::InvalidDate(raw.clone()))?;
            Ok(Arc::new(FixedClock::new(at)))
        }
        None => Ok(Arc::new(SystemClock)),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once and handed down
    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    let clock = clock_from_cli(&cli)?;

    dispatch(&cli, &cfg, clock)
}
