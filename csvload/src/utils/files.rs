// csvload/src/utils/files.rs
//! CSV file selection for an input folder.

use anyhow::{bail, Context, Result};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use csvload_core::{FileSelectionConfig, FileSelectionMode};

fn has_csv_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("csv")
}

/// Lists the CSV files to process, sorted by path.
///
/// In `all` mode every `*.csv` file directly inside `input_folder` is returned. In
/// `selected` mode only the listed files that exist are returned; missing ones are logged.
/// Fails if the folder does not exist or nothing is left to process.
pub fn select_csv_files(input_folder: &Path, selection: &FileSelectionConfig) -> Result<Vec<PathBuf>> {
    if !input_folder.is_dir() {
        bail!("Input folder not found: {}", input_folder.display());
    }

    let mut files: Vec<PathBuf> = match selection.mode {
        FileSelectionMode::All => {
            let entries = fs::read_dir(input_folder)
                .with_context(|| format!("Failed to read input folder {}", input_folder.display()))?;
            let mut found = Vec::new();
            for entry in entries {
                let path = entry?.path();
                if path.is_file() && has_csv_extension(&path) {
                    found.push(path);
                }
            }
            found
        }
        FileSelectionMode::Selected => {
            let (present, missing): (Vec<PathBuf>, Vec<PathBuf>) = selection
                .selected_files
                .iter()
                .map(|name| input_folder.join(name))
                .partition(|path| path.exists());
            if !missing.is_empty() {
                let names: Vec<String> = missing.iter().map(|p| p.display().to_string()).collect();
                warn!("Selected files not found: {}", names.join(", "));
            }
            present
        }
    };

    if files.is_empty() {
        bail!("No CSV files found in {}", input_folder.display());
    }

    files.sort();
    info!("Found {} CSV file(s) to process", files.len());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn folder_with(names: &[&str]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for name in names {
            fs::write(dir.path().join(name), "id\n1\n").unwrap();
        }
        dir
    }

    fn file_names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn all_mode_lists_sorted_csv_files() {
        let dir = folder_with(&["b.csv", "a.csv", "notes.txt"]);
        let files = select_csv_files(dir.path(), &FileSelectionConfig::default()).unwrap();
        assert_eq!(file_names(&files), vec!["a.csv", "b.csv"]);
    }

    #[test]
    fn selected_mode_skips_missing_files() {
        let dir = folder_with(&["orders.csv"]);
        let selection = FileSelectionConfig {
            mode: FileSelectionMode::Selected,
            selected_files: vec!["orders.csv".to_string(), "ghost.csv".to_string()],
        };
        let files = select_csv_files(dir.path(), &selection).unwrap();
        assert_eq!(file_names(&files), vec!["orders.csv"]);
    }

    #[test]
    fn empty_selection_is_an_error() {
        let dir = folder_with(&["readme.md"]);
        let err = select_csv_files(dir.path(), &FileSelectionConfig::default()).unwrap_err();
        assert!(err.to_string().starts_with("No CSV files found"));
    }

    #[test]
    fn missing_folder_is_an_error() {
        let err = select_csv_files(Path::new("/no/such/folder"), &FileSelectionConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Input folder not found"));
    }
}
