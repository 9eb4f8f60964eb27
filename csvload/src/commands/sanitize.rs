// csvload/src/commands/sanitize.rs
//! `csvload sanitize`: run the filename sanitizer over names given on the command line.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use std::io::{self, Write};

use csvload_core::{LoaderConfig, NameSanitizer, PatternSanitizer};

use crate::cli::{OutputFormat, SanitizeCommand};
use crate::ui::report::{sanitized_table, write_json, SanitizedRow};

pub fn sanitize_rows(cmd: &SanitizeCommand, config: &LoaderConfig) -> Result<Vec<SanitizedRow>> {
    let mut rules = config.sanitization_rules();
    if cmd.no_pascal_case {
        rules.use_pascal_case = false;
    }
    let sanitizer = PatternSanitizer::new(rules).context("Invalid filename sanitization rules")?;

    Ok(cmd
        .filenames
        .iter()
        .map(|filename| {
            let table_name = sanitizer.sanitize(filename);
            let valid = sanitizer.validate(&table_name);
            SanitizedRow {
                filename: filename.clone(),
                table_name,
                valid,
            }
        })
        .collect())
}

pub fn run_sanitize(cmd: &SanitizeCommand, config: &LoaderConfig) -> Result<()> {
    let rows = sanitize_rows(cmd, config)?;

    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut writer = stdout.lock();
    match cmd.output_format() {
        OutputFormat::Json => write_json(&mut writer, &rows)?,
        OutputFormat::Table => writeln!(writer, "{}", sanitized_table(&rows, supports_color))?,
    }
    Ok(())
}
