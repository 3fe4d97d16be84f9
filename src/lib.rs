//! rTripPlanner library root.
//! Exposes the trip store, aggregation, money and OCR modules, the CLI
//! parser and the high-level run() function.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod logging;
pub mod models;
pub mod money;
pub mod ocr;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Trip { .. } => cli::commands::trip::handle(&cli.command, cfg),
        Commands::Day { .. } => cli::commands::day::handle(&cli.command, cfg),
        Commands::Activity { .. } => cli::commands::activity::handle(&cli.command, cfg),
        Commands::Expense { .. } => cli::commands::expense::handle(&cli.command, cfg),
        Commands::Owner { .. } => cli::commands::owner::handle(&cli.command, cfg),
        Commands::Transport { .. } => cli::commands::transport::handle(&cli.command, cfg),
        Commands::Summary { .. } => cli::commands::summary::handle(&cli.command, cfg),
        Commands::Import { .. } => cli::commands::import::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once
    let mut cfg = Config::load()?;

    // 3️⃣ logging, now that the configured level is known
    logging::init_logging(&cfg.log_level);

    // 4️⃣ --db overrides the configured database
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    // 5️⃣ hand everything to the dispatcher
    dispatch(&cli, &cfg)
}
