// csvload/src/ui/report.rs
//! Name reports, rendered as a table or as JSON.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

use csvload_core::{NamingWarning, Resolution};

use crate::ui::output_format::validity_marker;

/// One line of the `names` report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameRow {
    pub filename: String,
    pub table_name: String,
    pub base_name: String,
    pub valid: bool,
    pub index_columns: Vec<String>,
    pub warnings: Vec<NamingWarning>,
}

impl NameRow {
    pub fn new(filename: String, resolution: Resolution, index_columns: Vec<String>) -> Self {
        let valid = resolution.is_valid();
        Self {
            filename,
            table_name: resolution.table_name,
            base_name: resolution.base_name,
            valid,
            index_columns,
            warnings: resolution.warnings,
        }
    }
}

/// The full `names` report.
#[derive(Debug, Clone, Serialize)]
pub struct NamesReport {
    pub config: Option<PathBuf>,
    pub input_folder: PathBuf,
    pub schema: String,
    pub table_prefix: String,
    pub tables: Vec<NameRow>,
}

impl NamesReport {
    pub fn warning_count(&self) -> usize {
        self.tables.iter().filter(|r| !r.warnings.is_empty()).count()
    }

    pub fn invalid_count(&self) -> usize {
        self.tables.iter().filter(|r| !r.valid).count()
    }
}

/// One line of the `sanitize` report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanitizedRow {
    pub filename: String,
    pub table_name: String,
    pub valid: bool,
}

fn new_table(headers: &[&str], supports_color: bool) -> Table {
    let mut table = Table::new();
    if !supports_color {
        table.force_no_tty();
    }
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| Cell::new(h).add_attribute(Attribute::Bold)));
    table
}

fn validity_cell(valid: bool) -> Cell {
    let color = if valid { Color::Green } else { Color::Red };
    Cell::new(validity_marker(valid)).fg(color)
}

pub fn names_table(report: &NamesReport, supports_color: bool) -> Table {
    let mut table = new_table(&["File", "Table", "Valid", "Indexes", "Warnings"], supports_color);
    for row in &report.tables {
        let warnings: Vec<String> = row.warnings.iter().map(ToString::to_string).collect();
        table.add_row(vec![
            Cell::new(&row.filename),
            Cell::new(format!("{}.{}", report.schema, row.table_name)),
            validity_cell(row.valid),
            Cell::new(row.index_columns.join(", ")),
            Cell::new(warnings.join("\n")),
        ]);
    }
    table
}

pub fn sanitized_table(rows: &[SanitizedRow], supports_color: bool) -> Table {
    let mut table = new_table(&["File", "Table", "Valid"], supports_color);
    for row in rows {
        table.add_row(vec![
            Cell::new(&row.filename),
            Cell::new(&row.table_name),
            validity_cell(row.valid),
        ]);
    }
    table
}

/// Writes `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}
