// csvload-core/src/engines/pattern_sanitizer.rs
//! A `NameSanitizer` implementation driven by regular-expression rules.
//!
//! The sanitizer owns its rules in compiled form only: strip patterns and custom
//! replacements are stored as source/regex pairs, so the rule set reported by
//! [`PatternSanitizer::rules`] is always the one being applied.
//!
//! License: MIT OR APACHE 2.0

use log::debug;

use crate::config::SanitizationRules;
use crate::engine::NameSanitizer;
use crate::errors::CsvLoadError;
use crate::sanitizers::compiler::{compile_optional, CompiledPattern, PatternSet, ReplacementSet};
use crate::sanitizers::stages::{self, Stage};
use crate::validators::IdentifierPolicy;

#[derive(Debug, Clone)]
pub struct PatternSanitizer {
    strip_patterns: PatternSet,
    custom_replacements: ReplacementSet,
    replace_with_underscore: Option<CompiledPattern>,
    remove_chars: Option<CompiledPattern>,
    max_length: usize,
    use_pascal_case: bool,
    remove_consecutive_underscores: bool,
    identifier_policy: IdentifierPolicy,
}

impl PatternSanitizer {
    /// Validates and compiles `rules`.
    pub fn new(rules: SanitizationRules) -> Result<Self, CsvLoadError> {
        rules.validate()?;

        let sanitizer = Self {
            strip_patterns: PatternSet::compile(&rules.strip_patterns)?,
            custom_replacements: ReplacementSet::compile(&rules.custom_replacements)?,
            replace_with_underscore: compile_optional(&rules.replace_with_underscore)?,
            remove_chars: compile_optional(&rules.remove_chars)?,
            max_length: rules.max_length,
            use_pascal_case: rules.use_pascal_case,
            remove_consecutive_underscores: rules.remove_consecutive_underscores,
            identifier_policy: IdentifierPolicy::default(),
        };
        debug!(
            "PatternSanitizer initialized: {} strip pattern(s), {} replacement(s), max_length={}, pascal_case={}.",
            sanitizer.strip_patterns.len(),
            sanitizer.custom_replacements.len(),
            sanitizer.max_length,
            sanitizer.use_pascal_case
        );
        Ok(sanitizer)
    }

    /// A sanitizer using the built-in rules.
    pub fn with_default_rules() -> Result<Self, CsvLoadError> {
        Self::new(SanitizationRules::default())
    }

    /// Uses a custom identifier policy for [`NameSanitizer::validate`].
    pub fn with_identifier_policy(mut self, policy: IdentifierPolicy) -> Self {
        self.identifier_policy = policy;
        self
    }

    /// The rule set currently applied, rebuilt from the compiled rules.
    pub fn rules(&self) -> SanitizationRules {
        SanitizationRules {
            strip_patterns: self.strip_patterns.sources(),
            replace_with_underscore: self
                .replace_with_underscore
                .as_ref()
                .map(|p| p.source().to_string())
                .unwrap_or_default(),
            remove_chars: self
                .remove_chars
                .as_ref()
                .map(|p| p.source().to_string())
                .unwrap_or_default(),
            max_length: self.max_length,
            use_pascal_case: self.use_pascal_case,
            remove_consecutive_underscores: self.remove_consecutive_underscores,
            custom_replacements: self.custom_replacements.to_replacements(),
        }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Appends a strip pattern. It applies to later `sanitize` calls; on error the
    /// pattern list is unchanged.
    pub fn add_pattern(&mut self, pattern: &str) -> Result<(), CsvLoadError> {
        self.strip_patterns.push(pattern)?;
        debug!("Added strip pattern '{}' (now {}).", pattern, self.strip_patterns.len());
        Ok(())
    }

    /// Adds or overwrites a custom replacement.
    pub fn add_replacement(&mut self, pattern: &str, replace_with: &str) -> Result<(), CsvLoadError> {
        self.custom_replacements.upsert(pattern, replace_with)?;
        debug!("Added replacement '{}' -> '{}'.", pattern, replace_with);
        Ok(())
    }

    /// Runs a single stage against `name`.
    pub fn apply_stage(&self, stage: Stage, name: &str) -> String {
        match stage {
            Stage::StripExtension => stages::strip_extension(name),
            Stage::CustomReplacements => stages::apply_replacements(name, &self.custom_replacements),
            Stage::StripPatterns => stages::strip_patterns(name, &self.strip_patterns),
            Stage::ReplaceWithUnderscore => {
                stages::replace_with_underscore(name, self.replace_with_underscore.as_ref())
            }
            Stage::RemoveChars => stages::remove_chars(name, self.remove_chars.as_ref()),
            Stage::CollapseUnderscores if self.remove_consecutive_underscores => {
                stages::collapse_underscores(name)
            }
            Stage::TrimUnderscores => stages::trim_underscores(name),
            Stage::PascalCase if self.use_pascal_case => stages::to_pascal_case(name),
            Stage::LeadingCharacter => stages::ensure_leading_character(name),
            Stage::Truncate => stages::truncate(name, self.max_length),
            Stage::Fallback => stages::fallback(name, self.max_length),
            Stage::CollapseUnderscores | Stage::PascalCase => name.to_string(),
        }
    }
}

impl NameSanitizer for PatternSanitizer {
    fn sanitize(&self, filename: &str) -> String {
        let mut name = filename.to_string();
        for stage in Stage::PIPELINE {
            let next = self.apply_stage(stage, &name);
            if next != name {
                debug!(target: "csvload_core::sanitizer", "{}: '{}' -> '{}'", stage, name, next);
            }
            name = next;
        }
        name
    }

    fn validate(&self, name: &str) -> bool {
        self.identifier_policy.is_valid(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sanitizer() -> PatternSanitizer {
        PatternSanitizer::with_default_rules().unwrap()
    }

    #[test]
    fn timestamped_filename() {
        assert_eq!(sanitizer().sanitize("CustomerAccount_2025-10-09_183621.csv"), "CustomerAccount");
    }

    #[test]
    fn spaces_and_hyphens() {
        assert_eq!(sanitizer().sanitize("sales data-2024.csv"), "SalesData");
    }

    #[test]
    fn stacked_suffixes() {
        assert_eq!(sanitizer().sanitize("orders_v2_backup_001.csv"), "Orders");
    }

    #[test]
    fn nothing_left_falls_back() {
        assert_eq!(sanitizer().sanitize("___.csv"), "UnnamedTable");
        assert_eq!(sanitizer().sanitize(""), "UnnamedTable");
        assert_eq!(sanitizer().sanitize("!!!.csv"), "UnnamedTable");
    }

    #[test]
    fn add_pattern_affects_later_calls() {
        let mut s = sanitizer();
        assert_eq!(s.sanitize("sales_export.csv"), "SalesExport");
        s.add_pattern(r"_export$").unwrap();
        assert_eq!(s.sanitize("sales_export.csv"), "Sales");
        assert_eq!(s.rules().strip_patterns.last().map(String::as_str), Some(r"_export$"));
    }

    #[test]
    fn invalid_pattern_is_rejected_without_side_effects() {
        let mut s = sanitizer();
        let before = s.rules().strip_patterns.len();
        assert!(s.add_pattern("(").is_err());
        assert_eq!(s.rules().strip_patterns.len(), before);
    }

    #[test]
    fn add_replacement_runs_before_stripping() {
        let mut s = sanitizer();
        s.add_replacement(r"^cust", "Customer").unwrap();
        assert_eq!(s.sanitize("cust_list_final.csv"), "CustomerList");
    }

    #[test]
    fn rules_round_trip_through_new() {
        let s = sanitizer();
        assert_eq!(s.rules(), SanitizationRules::default());
    }

    #[test]
    fn stages_can_be_applied_individually() {
        let s = sanitizer();
        assert_eq!(s.apply_stage(Stage::StripExtension, "a.b.csv"), "a.b");
        assert_eq!(s.apply_stage(Stage::ReplaceWithUnderscore, "a b-c.d"), "a_b_c_d");
        assert_eq!(s.apply_stage(Stage::RemoveChars, "Invoice#2024"), "Invoice2024");
    }

    #[test]
    fn pascal_case_can_be_disabled() {
        let rules = SanitizationRules { use_pascal_case: false, ..Default::default() };
        let s = PatternSanitizer::new(rules).unwrap();
        assert_eq!(s.sanitize("customer_account_2024-11-14.csv"), "customer_account");
    }
}
