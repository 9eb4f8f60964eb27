//! errors.rs - Custom error types for the csvload-core library.
//!
//! Sanitizing and resolving a name never fails. Errors only arise while building a
//! sanitizer from configuration: a pattern that does not compile, a pattern that is
//! too long, or a configuration value outside its allowed range.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// All error types raised by the `csvload-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CsvLoadError {
    #[error("Failed to compile pattern '{0}': {1}")]
    PatternCompilation(String, regex::Error),

    #[error("Pattern '{0}': length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yml::Error),
}
