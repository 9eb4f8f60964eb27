//! Pre-configured sanitizers and a one-shot helper for callers that do not want to
//! manage a `PatternSanitizer` themselves.

use crate::config::SanitizationRules;
use crate::engine::NameSanitizer;
use crate::engines::pattern_sanitizer::PatternSanitizer;
use crate::errors::CsvLoadError;

/// Enum to select a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// The built-in rules: timestamps, dates, versions and suffixes are removed.
    Timestamp,
    /// No noise stripping; only extension removal, normalization and PascalCase.
    Simple,
    /// The built-in rules without PascalCase conversion.
    PreserveCase,
}

impl Preset {
    pub fn rules(self) -> SanitizationRules {
        match self {
            Preset::Timestamp => SanitizationRules::default(),
            Preset::Simple => SanitizationRules {
                strip_patterns: Vec::new(),
                use_pascal_case: true,
                ..Default::default()
            },
            Preset::PreserveCase => SanitizationRules {
                use_pascal_case: false,
                ..Default::default()
            },
        }
    }

    pub fn build(self) -> Result<PatternSanitizer, CsvLoadError> {
        PatternSanitizer::new(self.rules())
    }
}

/// Sanitizes a single filename, with the default rules when `rules` is `None`.
///
/// # Arguments
///
/// * `filename` - The filename to sanitize, with or without extension.
/// * `rules` - Optional custom rules.
pub fn sanitize_filename(filename: &str, rules: Option<SanitizationRules>) -> Result<String, CsvLoadError> {
    let sanitizer = PatternSanitizer::new(rules.unwrap_or_default())?;
    Ok(sanitizer.sanitize(filename))
}
