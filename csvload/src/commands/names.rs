// csvload/src/commands/names.rs
//! `csvload names`: resolve the table name of every selected CSV file.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use csvload_core::{LoaderConfig, TableNameResolver};

use crate::cli::{NamesCommand, OutputFormat};
use crate::ui::output_format::{status, MessageKind};
use crate::ui::report::{names_table, write_json, NameRow, NamesReport};
use crate::utils::files::select_csv_files;

/// Builds the report without printing it.
pub fn build_report(
    cmd: &NamesCommand,
    mut config: LoaderConfig,
    config_path: Option<PathBuf>,
) -> Result<NamesReport> {
    if let Some(prefix) = &cmd.prefix {
        debug!("Table prefix overridden on the command line: '{}'", prefix);
        config.table_loading.table_prefix = prefix.clone();
    }

    let input_folder = cmd
        .input_folder
        .clone()
        .or_else(|| config.csv_processing.input_folder.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let resolver = TableNameResolver::from_config(&config).context("Invalid filename sanitization rules")?;
    let files = select_csv_files(&input_folder, &config.file_selection)?;

    let filenames: Vec<String> = files.iter().filter_map(|p| file_name(p)).collect();
    let tables = resolver
        .resolve_batch(&filenames)
        .into_iter()
        .map(|(filename, resolution)| {
            let index_columns = resolver
                .index_columns_for(&resolution.table_name)
                .map(<[String]>::to_vec)
                .unwrap_or_default();
            NameRow::new(filename, resolution, index_columns)
        })
        .collect();

    Ok(NamesReport {
        config: config_path,
        input_folder,
        schema: config.table_loading.schema.clone(),
        table_prefix: resolver.sanitized_prefix().to_string(),
        tables,
    })
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name().map(|n| n.to_string_lossy().into_owned())
}

pub fn run_names(cmd: &NamesCommand, config: LoaderConfig, config_path: Option<PathBuf>, quiet: bool) -> Result<()> {
    info!("Starting names operation.");
    let report = build_report(cmd, config, config_path)?;

    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut writer = stdout.lock();
    match cmd.output_format() {
        OutputFormat::Json => write_json(&mut writer, &report)?,
        OutputFormat::Table => writeln!(writer, "{}", names_table(&report, supports_color))?,
    }

    if !quiet && cmd.output_format() == OutputFormat::Table {
        let kind = if report.invalid_count() > 0 { MessageKind::Warn } else { MessageKind::Success };
        status(
            kind,
            format!(
                "Resolved {} file(s): {} with warnings, {} possibly invalid.",
                report.tables.len(),
                report.warning_count(),
                report.invalid_count()
            ),
        );
    }
    Ok(())
}
