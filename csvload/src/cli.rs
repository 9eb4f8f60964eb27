// csvload/src/cli.rs
//! This file defines the command-line interface (CLI) for the csvload application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "csvload",
    version = env!("CARGO_PKG_VERSION"),
    about = "Preview the SQL Server table names CSV files will load into",
    long_about = "csvload reads a loader configuration, selects CSV files from an input folder and shows the table name each file resolves to: timestamps, version tags and working-copy suffixes are stripped, the name is normalized to a valid identifier and the configured table prefix is applied.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, conflicts_with = "debug", help = "Suppress all log output.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG and the configured level)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Path to a loader configuration file (YAML).
    #[arg(
        long = "config",
        value_name = "FILE",
        global = true,
        env = "CSVLOAD_CONFIG",
        help = "Path to a loader configuration file (YAML)."
    )]
    pub config: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `csvload` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolves the table name of every selected CSV file in the input folder.
    #[command(about = "Resolve table names for the CSV files in the input folder.")]
    Names(NamesCommand),

    /// Sanitizes filenames given on the command line.
    #[command(about = "Sanitize filenames without touching the filesystem.")]
    Sanitize(SanitizeCommand),
}

/// Output rendering for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// A table for humans.
    #[default]
    Table,
    /// One JSON document on stdout.
    Json,
}

/// Arguments for the `names` command.
#[derive(Parser, Debug)]
pub struct NamesCommand {
    /// Folder to scan; overrides `csv_processing.input_folder`.
    #[arg(long, short = 'i', value_name = "DIR", help = "Folder containing the CSV files.")]
    pub input_folder: Option<PathBuf>,

    /// Table prefix; overrides `table_loading.table_prefix`.
    #[arg(long, short = 'p', value_name = "PREFIX", help = "Prefix to prepend to every table name.")]
    pub prefix: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table, help = "Output format.")]
    pub format: OutputFormat,

    /// Shorthand for `--format json`.
    #[arg(long, conflicts_with = "format", help = "Print the report as JSON.")]
    pub json: bool,
}

/// Arguments for the `sanitize` command.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    /// Filenames to sanitize.
    #[arg(value_name = "FILENAME", required = true)]
    pub filenames: Vec<String>,

    /// Keep word case instead of converting to PascalCase.
    #[arg(long = "no-pascal-case", help = "Do not convert names to PascalCase.")]
    pub no_pascal_case: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table, help = "Output format.")]
    pub format: OutputFormat,

    /// Shorthand for `--format json`.
    #[arg(long, conflicts_with = "format", help = "Print the report as JSON.")]
    pub json: bool,
}

impl NamesCommand {
    pub fn output_format(&self) -> OutputFormat {
        if self.json { OutputFormat::Json } else { self.format }
    }
}

impl SanitizeCommand {
    pub fn output_format(&self) -> OutputFormat {
        if self.json { OutputFormat::Json } else { self.format }
    }
}
