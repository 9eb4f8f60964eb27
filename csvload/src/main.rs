// csvload/src/main.rs
//! csvload entry point.

use anyhow::Result;
use clap::Parser;

use csvload::cli::Cli;

fn main() -> Result<()> {
    csvload::run(Cli::parse())
}
