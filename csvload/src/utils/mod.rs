// csvload/src/utils/mod.rs
//! Filesystem helpers: configuration lookup and CSV file selection.

pub mod config_paths;
pub mod files;
