// csvload-core/src/lib.rs
//! # csvload Core Library
//!
//! `csvload-core` turns CSV filenames into SQL Server table names. Real-world exports
//! arrive with names like `CustomerAccount_2025-10-09_183621.csv` or
//! `orders_v2_backup_001.csv`; this crate strips the timestamps, versions and working-copy
//! suffixes, normalizes punctuation, and produces an identifier the database accepts.
//!
//! The library is pure: it performs no I/O beyond reading a configuration file on request,
//! and every sanitizer and resolver can be shared across threads.
//!
//! ## Modules
//!
//! * `config`: `SanitizationRules`, `TableLoadingConfig` and the YAML `LoaderConfig`.
//! * `sanitizers`: rule compilation and the individual pipeline stages.
//! * `engine`: the `NameSanitizer` trait.
//! * `engines`: the regex-driven `PatternSanitizer`.
//! * `resolver`: `TableNameResolver`, prefix composition and index lookup.
//! * `validators`: identifier validation and the body/prefix character policies.
//! * `presets`: ready-made sanitizers and a one-shot helper.
//!
//! ## Usage Example
//!
//! ```rust
//! use csvload_core::{LoaderConfig, NameSanitizer, PatternSanitizer, TableNameResolver};
//!
//! fn main() -> anyhow::Result<()> {
//!     let sanitizer = PatternSanitizer::with_default_rules()?;
//!     assert_eq!(sanitizer.sanitize("CustomerAccount_2025-10-09_183621.csv"), "CustomerAccount");
//!
//!     let config = LoaderConfig::from_yaml_str("table_loading:\n  table_prefix: tbl_\n")?;
//!     let resolver = TableNameResolver::from_config(&config)?;
//!     let resolution = resolver.resolve("sales data-2024.csv");
//!     assert_eq!(resolution.table_name, "tbl_SalesData");
//!     assert!(resolution.warnings.is_empty());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Sanitizing and resolving never fail; a questionable result is reported as a
//! `NamingWarning`. Building a sanitizer can fail with a `CsvLoadError` when a rule does
//! not compile. Configuration loading returns `anyhow::Error` with file context.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod presets;
pub mod resolver;
pub mod sanitizers;
pub mod validators;

/// Re-exports the configuration types.
pub use config::{
    FileSelectionConfig,
    FileSelectionMode,
    FilenameSanitizationConfig,
    LoaderConfig,
    Replacement,
    Replacements,
    SanitizationRules,
    TableLoadingConfig,
    TableNaming,
    FALLBACK_TABLE_NAME,
    MAX_PATTERN_LENGTH,
};

/// Re-exports the custom error type.
pub use errors::CsvLoadError;

pub use engine::NameSanitizer;
pub use engines::pattern_sanitizer::PatternSanitizer;

pub use resolver::{compose_with_prefix, find_index_columns, NamingWarning, Resolution, TableNameResolver};

pub use validators::{is_valid_table_name, sanitize_prefix, IdentifierPolicy, PrefixPolicy, MAX_IDENTIFIER_LENGTH};

pub use presets::{sanitize_filename, Preset};

// Lower-level building blocks for custom pipelines.
pub use sanitizers::compiler::{CompiledPattern, PatternSet, ReplacementSet};
pub use sanitizers::stages::Stage;
