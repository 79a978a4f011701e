//! rPaytracker library root.
//! Exposes the CLI parser, the high-level run() function and the pay/session modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;
pub mod widget;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config {
            print_config,
            edit_config,
            editor,
        } => cli::commands::config::handle(*print_config, *edit_config, editor.as_ref(), cfg),
        Commands::Db {
            migrate,
            check,
            info,
        } => cli::commands::db::handle(*migrate, *check, *info, cfg),
        Commands::Log { print } => cli::commands::log::handle(*print, cfg),
        Commands::CheckIn => cli::commands::checkin::handle(cfg),
        Commands::CheckOut => cli::commands::checkout::handle(cfg),
        Commands::Status { watch, rate } => cli::commands::status::handle(*watch, *rate, cfg),
        Commands::List { limit } => cli::commands::list::handle(*limit, cfg),
        Commands::Widget {
            entries,
            interval,
            file,
            json,
        } => cli::commands::widget::handle(*entries, *interval, file.as_ref(), *json, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // Config is read once; --db overrides the configured database.
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
