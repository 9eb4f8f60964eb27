// csvload/src/utils/config_paths.rs
//! Locating and loading the loader configuration.
//!
//! Lookup order: an explicit path (flag or `CSVLOAD_CONFIG`), then `./config.yaml`, then
//! `<config_dir>/csvload/config.yaml`. When none of these exist the built-in defaults apply.

use anyhow::{Context, Result};
use log::{debug, info};
use std::env;
use std::path::{Path, PathBuf};

use csvload_core::LoaderConfig;

pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const APP_DIR_NAME: &str = "csvload";

/// Implicit locations checked when no path is given, in priority order.
pub fn default_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::with_capacity(2);
    if let Ok(cwd) = env::current_dir() {
        candidates.push(cwd.join(CONFIG_FILE_NAME));
    }
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME));
    }
    candidates
}

/// Returns the configuration file to use, if any.
///
/// An explicit path is returned as-is even when it does not exist, so the load reports it.
pub fn locate_config(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    default_candidates().into_iter().find(|p| p.is_file())
}

/// Loads the configuration, returning it with the path it came from.
pub fn load_config(explicit: Option<&Path>) -> Result<(LoaderConfig, Option<PathBuf>)> {
    match locate_config(explicit) {
        Some(path) => {
            let config = LoaderConfig::load_from_file(&path)
                .with_context(|| format!("Could not load configuration from {}", path.display()))?;
            info!("Loaded configuration from {}", path.display());
            Ok((config, Some(path)))
        }
        None => {
            debug!("No configuration file found; using defaults.");
            Ok((LoaderConfig::default(), None))
        }
    }
}
