//! Table name resolution: base-name selection, sanitization, prefixing and validation.
//!
//! [`TableNameResolver::resolve`] never fails. Everything that could go wrong with a name
//! (an unusable prefix, truncation, a final name the database may reject) is reported as a
//! [`NamingWarning`] next to the name, and the caller decides whether to proceed.
//!
//! License: MIT OR Apache-2.0

use log::{debug, info, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::config::{LoaderConfig, TableLoadingConfig, TableNaming};
use crate::engine::NameSanitizer;
use crate::engines::pattern_sanitizer::PatternSanitizer;
use crate::errors::CsvLoadError;
use crate::sanitizers::stages::strip_extension;
use crate::validators::{PrefixPolicy, MAX_IDENTIFIER_LENGTH};

/// A non-fatal problem found while resolving a table name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NamingWarning {
    /// The configured prefix contained disallowed characters.
    PrefixSanitized { original: String, sanitized: String },
    /// Nothing usable was left of the prefix, so none was applied.
    PrefixDiscarded { original: String },
    /// The base name was cut so that prefix and base fit the identifier limit.
    BaseTruncated { base: String, from: usize, to: usize },
    /// The final name fails identifier validation.
    InvalidName { name: String },
}

impl fmt::Display for NamingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingWarning::PrefixSanitized { original, sanitized } => {
                write!(f, "prefix sanitized: '{}' → '{}'", original, sanitized)
            }
            NamingWarning::PrefixDiscarded { original } => {
                write!(f, "prefix discarded: '{}' has no valid characters", original)
            }
            NamingWarning::BaseTruncated { base, from, to } => write!(
                f,
                "base name truncated to fit prefix: '{}' cut from {} to {} characters",
                base, from, to
            ),
            NamingWarning::InvalidName { name } => {
                write!(f, "table name may not be valid: '{}'", name)
            }
        }
    }
}

/// The outcome of resolving one filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The final, possibly prefixed, table name.
    pub table_name: String,
    /// The name before the prefix was applied.
    pub base_name: String,
    pub warnings: Vec<NamingWarning>,
}

impl Resolution {
    /// `false` if the final name failed identifier validation.
    pub fn is_valid(&self) -> bool {
        !self
            .warnings
            .iter()
            .any(|w| matches!(w, NamingWarning::InvalidName { .. }))
    }

    pub fn into_parts(self) -> (String, Vec<NamingWarning>) {
        (self.table_name, self.warnings)
    }
}

/// Joins `prefix` and `base`, cutting `base` so the result stays within `limit` characters.
///
/// The prefix is never shortened. A prefix that alone exceeds `limit` (for example a
/// 128-character prefix that gained a leading `_`) is returned in full with an empty
/// base, so the result is longer than `limit` and fails identifier validation.
pub fn compose_with_prefix(prefix: &str, base: &str, limit: usize) -> (String, Option<NamingWarning>) {
    let max_base_length = limit.saturating_sub(prefix.chars().count());
    let base_length = base.chars().count();

    if base_length <= max_base_length {
        return (format!("{}{}", prefix, base), None);
    }

    let truncated: String = base.chars().take(max_base_length).collect();
    let warning = NamingWarning::BaseTruncated {
        base: base.to_string(),
        from: base_length,
        to: max_base_length,
    };
    (format!("{}{}", prefix, truncated), Some(warning))
}

/// Finds index columns for `table_name`.
///
/// An exact match wins. Otherwise, if `sanitized_prefix` is non-empty and `table_name`
/// starts with it, the lookup is retried with the prefix removed, so index configuration
/// can name either the prefixed or the unprefixed table.
pub fn find_index_columns<'a>(
    indexes: &'a HashMap<String, Vec<String>>,
    table_name: &str,
    sanitized_prefix: &str,
) -> Option<&'a [String]> {
    if let Some(columns) = indexes.get(table_name) {
        return Some(columns.as_slice());
    }

    if sanitized_prefix.is_empty() {
        return None;
    }

    let base_name = table_name.strip_prefix(sanitized_prefix)?;
    let columns = indexes.get(base_name)?;
    debug!(
        "Found index config for base name '{}' (full table: '{}').",
        base_name, table_name
    );
    Some(columns.as_slice())
}

/// Resolves CSV filenames to table names.
#[derive(Debug, Clone)]
pub struct TableNameResolver<S: NameSanitizer = PatternSanitizer> {
    config: TableLoadingConfig,
    sanitizer: S,
    prefix_policy: PrefixPolicy,
    sanitized_prefix: String,
}

impl TableNameResolver<PatternSanitizer> {
    /// Builds a resolver with a `PatternSanitizer` compiled from the configuration.
    pub fn from_config(config: &LoaderConfig) -> Result<Self, CsvLoadError> {
        let sanitizer = PatternSanitizer::new(config.sanitization_rules())?;
        Ok(Self::new(config.table_loading.clone(), sanitizer))
    }
}

impl<S: NameSanitizer> TableNameResolver<S> {
    pub fn new(config: TableLoadingConfig, sanitizer: S) -> Self {
        Self::with_prefix_policy(config, sanitizer, PrefixPolicy::default())
    }

    pub fn with_prefix_policy(config: TableLoadingConfig, sanitizer: S, prefix_policy: PrefixPolicy) -> Self {
        let sanitized_prefix = prefix_policy.sanitize(&config.table_prefix).into_owned();
        if sanitized_prefix != config.table_prefix {
            warn!(
                "Table prefix sanitized for SQL Server compliance: '{}' → '{}'",
                config.table_prefix, sanitized_prefix
            );
        }
        Self {
            config,
            sanitizer,
            prefix_policy,
            sanitized_prefix,
        }
    }

    pub fn config(&self) -> &TableLoadingConfig {
        &self.config
    }

    pub fn sanitizer(&self) -> &S {
        &self.sanitizer
    }

    /// Mutable access for registering extra rules before resolution starts.
    pub fn sanitizer_mut(&mut self) -> &mut S {
        &mut self.sanitizer
    }

    pub fn prefix_policy(&self) -> PrefixPolicy {
        self.prefix_policy
    }

    /// The prefix as it is applied; empty when no prefix is in effect.
    pub fn sanitized_prefix(&self) -> &str {
        &self.sanitized_prefix
    }

    /// Chooses the base name before sanitization.
    pub fn base_name(&self, original_filename: &str) -> String {
        match self.config.table_naming {
            TableNaming::Custom => self
                .config
                .custom_table_names
                .get(original_filename)
                .cloned()
                .unwrap_or_else(|| strip_extension(original_filename)),
            TableNaming::Filename => strip_extension(original_filename),
        }
    }

    pub fn resolve(&self, original_filename: &str) -> Resolution {
        let mut warnings = Vec::new();
        let mut table_name = self.base_name(original_filename);

        // Sanitization starts again from the raw filename, so a custom name is dropped here.
        if self.config.enable_sanitization {
            let sanitized = self.sanitizer.sanitize(original_filename);
            if sanitized != table_name {
                info!("Sanitized table name: '{}' → '{}'", table_name, sanitized);
            }
            table_name = sanitized;
        }

        let base_name = table_name.clone();
        let raw_prefix = self.config.table_prefix.as_str();

        if !raw_prefix.is_empty() {
            if self.sanitized_prefix.is_empty() {
                warnings.push(NamingWarning::PrefixDiscarded {
                    original: raw_prefix.to_string(),
                });
            } else {
                if self.sanitized_prefix != raw_prefix {
                    warnings.push(NamingWarning::PrefixSanitized {
                        original: raw_prefix.to_string(),
                        sanitized: self.sanitized_prefix.clone(),
                    });
                }

                let (composed, truncation) =
                    compose_with_prefix(&self.sanitized_prefix, &table_name, MAX_IDENTIFIER_LENGTH);
                if let Some(truncation) = truncation {
                    warn!(
                        "Table name '{}' is too long with prefix '{}': {}",
                        table_name, self.sanitized_prefix, truncation
                    );
                    warnings.push(truncation);
                }
                info!("Applied table prefix: '{}' → '{}'", table_name, composed);
                table_name = composed;
            }
        }

        if !self.sanitizer.validate(&table_name) {
            warn!("Table name '{}' may not be valid for SQL Server", table_name);
            warnings.push(NamingWarning::InvalidName {
                name: table_name.clone(),
            });
        }

        Resolution {
            table_name,
            base_name,
            warnings,
        }
    }

    /// Resolves each filename in order.
    pub fn resolve_batch<I, T>(&self, filenames: I) -> Vec<(String, Resolution)>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        filenames
            .into_iter()
            .map(|f| {
                let filename = f.as_ref();
                (filename.to_string(), self.resolve(filename))
            })
            .collect()
    }

    /// Index columns configured for a resolved table name.
    pub fn index_columns_for(&self, table_name: &str) -> Option<&[String]> {
        find_index_columns(&self.config.create_indexes, table_name, &self.sanitized_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indexes() -> HashMap<String, Vec<String>> {
        HashMap::from([
            ("tbl_Orders".to_string(), vec!["order_id".to_string()]),
            ("Customers".to_string(), vec!["customer_id".to_string(), "email".to_string()]),
        ])
    }

    #[test]
    fn exact_index_match_wins() {
        let idx = indexes();
        assert_eq!(find_index_columns(&idx, "tbl_Orders", "tbl_"), Some(&["order_id".to_string()][..]));
    }

    #[test]
    fn index_lookup_falls_back_to_unprefixed_name() {
        let idx = indexes();
        let columns = find_index_columns(&idx, "tbl_Customers", "tbl_").unwrap();
        assert_eq!(columns, ["customer_id".to_string(), "email".to_string()]);
    }

    #[test]
    fn index_lookup_requires_real_prefix() {
        let idx = indexes();
        assert_eq!(find_index_columns(&idx, "xCustomers", "tbl_"), None);
        assert_eq!(find_index_columns(&idx, "tbl_Customers", ""), None);
    }

    #[test]
    fn compose_without_truncation() {
        let (name, warning) = compose_with_prefix("tbl_", "CustomerAccount", 128);
        assert_eq!(name, "tbl_CustomerAccount");
        assert!(warning.is_none());
    }

    #[test]
    fn compose_truncates_base_only() {
        let base = "B".repeat(130);
        let (name, warning) = compose_with_prefix("stg_", &base, 128);
        assert_eq!(name.chars().count(), 128);
        assert!(name.starts_with("stg_"));
        assert_eq!(
            warning,
            Some(NamingWarning::BaseTruncated { base, from: 130, to: 124 })
        );
    }

    #[test]
    fn compose_keeps_prefix_over_limit() {
        let prefix = format!("_{}", "1".repeat(128));
        let (name, warning) = compose_with_prefix(&prefix, "Sales", 128);
        assert_eq!(name, prefix);
        assert_eq!(
            warning,
            Some(NamingWarning::BaseTruncated { base: "Sales".to_string(), from: 5, to: 0 })
        );
    }

    #[test]
    fn warning_messages() {
        let w = NamingWarning::PrefixSanitized {
            original: "tbl-test".to_string(),
            sanitized: "tbltest".to_string(),
        };
        assert_eq!(w.to_string(), "prefix sanitized: 'tbl-test' → 'tbltest'");
        let w = NamingWarning::InvalidName { name: "a b".to_string() };
        assert!(w.to_string().starts_with("table name may not be valid"));
    }
}
