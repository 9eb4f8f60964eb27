// csvload/src/lib.rs
//! # csvload CLI Application
//!
//! Terminal front end for `csvload-core`: locates the loader configuration, selects CSV
//! files and reports the SQL Server table name each one resolves to.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;

use anyhow::Result;
use log::{warn, LevelFilter};
use std::env;

use crate::cli::{Cli, Commands};
use crate::utils::config_paths::{load_config, locate_config};

/// Picks the log level: `--quiet`/`--debug` first, then `RUST_LOG`, then `logging.level`.
fn requested_level(cli: &Cli) -> (Option<LevelFilter>, Option<String>) {
    if cli.quiet {
        return (Some(LevelFilter::Off), None);
    }
    if cli.debug {
        return (Some(LevelFilter::Debug), None);
    }
    if env::var_os("RUST_LOG").is_some() {
        return (None, None);
    }
    // Logging must be configured before the full load, so only the level is read here.
    let configured = locate_config(cli.config.as_deref())
        .and_then(|path| std::fs::read_to_string(path).ok())
        .and_then(|text| csvload_core::LoaderConfig::from_yaml_str(&text).ok())
        .map(|config| config.logging.level);
    match configured {
        Some(name) => match logger::level_from_name(&name) {
            Some(level) => (Some(level), None),
            None => (None, Some(name)),
        },
        None => (None, None),
    }
}

/// Runs a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let (level, unknown_level) = requested_level(&cli);
    logger::init_logger(level);
    if let Some(name) = unknown_level {
        warn!("Unknown logging level '{}' in configuration; using the default.", name);
    }

    let (config, config_path) = load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Names(cmd) => commands::names::run_names(cmd, config, config_path, cli.quiet),
        Commands::Sanitize(cmd) => commands::sanitize::run_sanitize(cmd, &config),
    }
}
