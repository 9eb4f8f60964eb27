//! Configuration management for `csvload-core`.
//!
//! This module defines the naming rules applied to CSV filenames and the subset of the
//! loader configuration that decides how a table is named. It handles YAML
//! deserialization, merging user overrides over the built-in defaults, and validation
//! of the resulting rule set.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::CsvLoadError;
use crate::validators::MAX_IDENTIFIER_LENGTH;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Name substituted when nothing usable survives sanitization.
pub const FALLBACK_TABLE_NAME: &str = "UnnamedTable";

/// Leading separator shared by the built-in strip patterns.
macro_rules! sep {
    ($rest:literal) => {
        concat!(r"[_\s.\-]", $rest)
    };
}

/// Built-in noise patterns, applied in this order.
pub const DEFAULT_STRIP_PATTERNS: &[&str] = &[
    // Timestamps: _YYYY-MM-DD_HHMMSS, _YYYYMMDD_HHMMSS
    sep!(r"\d{4}-\d{2}-\d{2}[_\s]\d{6}"),
    sep!(r"\d{8}[_\s]\d{6}"),
    // Dates: _YYYY-MM-DD, _YYYYMMDD, _MMDDYYYY
    sep!(r"\d{4}-\d{2}-\d{2}"),
    sep!(r"\d{8}"),
    sep!(r"\d{2}\d{2}\d{4}"),
    // Trailing times: _HHMMSS, _HH-MM-SS
    sep!(r"\d{6}$"),
    sep!(r"\d{2}-\d{2}-\d{2}$"),
    // Versions: _v1, _v2.0, _ver1, _version3
    sep!(r"v\d+(\.\d+)?"),
    sep!(r"ver\d+"),
    sep!(r"version\d+"),
    // Trailing working-copy suffixes
    sep!(r"final$"),
    sep!(r"backup$"),
    sep!(r"temp$"),
    sep!(r"copy$"),
    sep!(r"old$"),
    sep!(r"new$"),
    // Sequence numbers: _001, _1
    sep!(r"\d+$"),
];

/// Characters collapsed into a single underscore.
pub const DEFAULT_REPLACE_WITH_UNDERSCORE: &str = r"[\s\-.]+";

/// Characters removed entirely.
pub const DEFAULT_REMOVE_CHARS: &str = r"[^\w\s]";

/// A single custom substitution applied before pattern stripping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Case-insensitive regex to search for.
    pub pattern: String,
    /// Literal text written in place of each match.
    pub replace_with: String,
}

/// Ordered `pattern -> replacement` mapping.
///
/// Serialized as a YAML mapping; document order is kept because earlier replacements
/// feed into later ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements(Vec<Replacement>);

impl Replacements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a replacement. An existing entry for the same pattern is overwritten in place.
    pub fn insert(&mut self, pattern: impl Into<String>, replace_with: impl Into<String>) {
        let pattern = pattern.into();
        let replace_with = replace_with.into();
        match self.0.iter_mut().find(|r| r.pattern == pattern) {
            Some(existing) => existing.replace_with = replace_with,
            None => self.0.push(Replacement { pattern, replace_with }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Replacement> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<P: Into<String>, R: Into<String>> FromIterator<(P, R)> for Replacements {
    fn from_iter<I: IntoIterator<Item = (P, R)>>(iter: I) -> Self {
        let mut out = Replacements::new();
        for (pattern, replace_with) in iter {
            out.insert(pattern, replace_with);
        }
        out
    }
}

impl Serialize for Replacements {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for r in &self.0 {
            map.serialize_entry(&r.pattern, &r.replace_with)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Replacements {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ReplacementsVisitor;

        impl<'de> Visitor<'de> for ReplacementsVisitor {
            type Value = Replacements;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of regex pattern to replacement text")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut out = Replacements::new();
                while let Some((pattern, replace_with)) = access.next_entry::<String, String>()? {
                    out.insert(pattern, replace_with);
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(ReplacementsVisitor)
    }
}

/// Treats an explicit YAML `null` the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The rule set driving filename sanitization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SanitizationRules {
    /// Regexes removed from the name, in order, case-insensitively.
    pub strip_patterns: Vec<String>,
    /// Regex whose matches become a single underscore. Empty disables the step.
    pub replace_with_underscore: String,
    /// Regex whose matches are deleted. Empty disables the step.
    pub remove_chars: String,
    /// Upper bound on the sanitized name length, in characters.
    pub max_length: usize,
    pub use_pascal_case: bool,
    pub remove_consecutive_underscores: bool,
    /// Applied before pattern stripping.
    #[serde(deserialize_with = "null_as_default")]
    pub custom_replacements: Replacements,
}

impl Default for SanitizationRules {
    fn default() -> Self {
        Self {
            strip_patterns: DEFAULT_STRIP_PATTERNS.iter().map(|p| p.to_string()).collect(),
            replace_with_underscore: DEFAULT_REPLACE_WITH_UNDERSCORE.to_string(),
            remove_chars: DEFAULT_REMOVE_CHARS.to_string(),
            max_length: MAX_IDENTIFIER_LENGTH,
            use_pascal_case: true,
            remove_consecutive_underscores: true,
            custom_replacements: Replacements::new(),
        }
    }
}

impl SanitizationRules {
    /// Checks the values regex compilation cannot catch.
    pub fn validate(&self) -> std::result::Result<(), CsvLoadError> {
        let mut errors = Vec::new();

        if self.max_length == 0 {
            errors.push("`max_length` must be greater than 0.".to_string());
        } else if self.max_length > MAX_IDENTIFIER_LENGTH {
            warn!(
                "`max_length` of {} exceeds the {}-character identifier limit; long names will fail validation.",
                self.max_length, MAX_IDENTIFIER_LENGTH
            );
        }

        for (idx, pattern) in self.strip_patterns.iter().enumerate() {
            if pattern.is_empty() {
                errors.push(format!("Strip pattern #{} is empty.", idx + 1));
            }
        }

        for replacement in self.custom_replacements.iter() {
            if replacement.pattern.is_empty() {
                errors.push(format!(
                    "A custom replacement for '{}' has an empty pattern.",
                    replacement.replace_with
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CsvLoadError::InvalidConfig(errors.join(" ")))
        }
    }
}

/// How the base table name is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TableNaming {
    /// Derive the name from the CSV filename.
    #[default]
    Filename,
    /// Look the filename up in `custom_table_names`, falling back to the filename.
    Custom,
}

/// Table loading settings. Only the naming-related fields are interpreted here;
/// `schema` and `if_exists` are carried for the loader.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TableLoadingConfig {
    pub if_exists: String,
    pub schema: String,
    pub table_naming: TableNaming,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_table_names: HashMap<String, String>,
    /// Index columns keyed by either the prefixed or the unprefixed table name.
    #[serde(deserialize_with = "null_as_default")]
    pub create_indexes: HashMap<String, Vec<String>>,
    pub enable_sanitization: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub table_prefix: String,
}

impl Default for TableLoadingConfig {
    fn default() -> Self {
        Self {
            if_exists: "fail".to_string(),
            schema: "dbo".to_string(),
            table_naming: TableNaming::Filename,
            custom_table_names: HashMap::new(),
            create_indexes: HashMap::new(),
            enable_sanitization: true,
            table_prefix: String::new(),
        }
    }
}

/// User overrides for [`SanitizationRules`]. Absent keys keep the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilenameSanitizationConfig {
    pub use_pascal_case: Option<bool>,
    pub max_length: Option<usize>,
    /// Appended after the built-in strip patterns.
    #[serde(deserialize_with = "null_as_default")]
    pub custom_patterns: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub custom_replacements: Replacements,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileSelectionMode {
    #[default]
    All,
    Selected,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FileSelectionConfig {
    pub mode: FileSelectionMode,
    #[serde(deserialize_with = "null_as_default")]
    pub selected_files: Vec<String>,
}

/// Only the input folder is read; dialect settings belong to the CSV reader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CsvProcessingConfig {
    pub input_folder: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

/// The top-level loader configuration document. Unknown sections such as
/// `database` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub table_loading: TableLoadingConfig,
    pub filename_sanitization: Option<FilenameSanitizationConfig>,
    pub file_selection: FileSelectionConfig,
    pub csv_processing: CsvProcessingConfig,
    pub logging: LoggingConfig,
}

impl LoaderConfig {
    /// Loads the loader configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config
            .validate()
            .map_err(|e| anyhow!("{} ({})", e, path.display()))?;
        debug!(
            "Loaded configuration: naming={:?}, sanitization={}, prefix='{}'.",
            config.table_loading.table_naming,
            config.table_loading.enable_sanitization,
            config.table_loading.table_prefix
        );
        Ok(config)
    }

    pub fn from_yaml_str(text: &str) -> std::result::Result<Self, CsvLoadError> {
        // An empty document deserializes to unit, not a mapping.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(text)?)
    }

    /// Builds the effective rule set: defaults, then user overrides.
    pub fn sanitization_rules(&self) -> SanitizationRules {
        let mut rules = SanitizationRules::default();
        let Some(overrides) = &self.filename_sanitization else {
            return rules;
        };

        if let Some(use_pascal_case) = overrides.use_pascal_case {
            rules.use_pascal_case = use_pascal_case;
        }
        if let Some(max_length) = overrides.max_length {
            rules.max_length = max_length;
        }
        if !overrides.custom_patterns.is_empty() {
            debug!("Appending {} custom strip pattern(s).", overrides.custom_patterns.len());
            rules.strip_patterns.extend(overrides.custom_patterns.iter().cloned());
        }
        for replacement in overrides.custom_replacements.iter() {
            rules
                .custom_replacements
                .insert(replacement.pattern.clone(), replacement.replace_with.clone());
        }
        rules
    }

    pub fn validate(&self) -> std::result::Result<(), CsvLoadError> {
        self.sanitization_rules().validate()?;

        let tl = &self.table_loading;
        if tl.table_naming == TableNaming::Custom && tl.custom_table_names.is_empty() {
            warn!("`table_naming` is 'custom' but `custom_table_names` is empty; filenames will be used.");
        }
        if tl.table_naming == TableNaming::Custom && tl.enable_sanitization && !tl.custom_table_names.is_empty() {
            warn!("`enable_sanitization` is on, so `custom_table_names` are replaced by the sanitized filename.");
        }
        if self.file_selection.mode == FileSelectionMode::Selected && self.file_selection.selected_files.is_empty() {
            warn!("File selection mode is 'selected' but no files are listed.");
        }
        Ok(())
    }
}
