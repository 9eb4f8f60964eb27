//! compiler.rs - Compiles naming rules into ready-to-apply regular expressions.
//!
//! Every pattern is stored together with the source string it was compiled from, and
//! collections only grow through `push`/`upsert`, which compile first and insert second.
//! A failed compilation therefore leaves a collection exactly as it was.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use regex::{NoExpand, Regex, RegexBuilder};
use std::borrow::Cow;

use crate::config::{Replacements, MAX_PATTERN_LENGTH};
use crate::errors::CsvLoadError;

/// Compiled regex size limit (10 MB).
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// A regex together with the pattern string it was built from.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    regex: Regex,
}

impl CompiledPattern {
    /// Compiles `pattern`. Strip patterns and custom replacements are case-insensitive.
    pub fn new(pattern: &str, case_insensitive: bool) -> Result<Self, CsvLoadError> {
        if pattern.len() > MAX_PATTERN_LENGTH {
            return Err(CsvLoadError::PatternLengthExceeded(
                pattern.to_string(),
                pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
        }

        let regex = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .size_limit(REGEX_SIZE_LIMIT)
            .build()
            .map_err(|e| CsvLoadError::PatternCompilation(pattern.to_string(), e))?;

        log::debug!(
            target: "csvload_core::compiler",
            "Pattern '{}' compiled (case_insensitive={}).",
            pattern,
            case_insensitive
        );
        Ok(Self { source: pattern.to_string(), regex })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Replaces every match with `replacement`, taken literally.
    pub fn replace_all<'h>(&self, haystack: &'h str, replacement: &str) -> Cow<'h, str> {
        self.regex.replace_all(haystack, NoExpand(replacement))
    }

    /// Removes every match.
    pub fn remove_all<'h>(&self, haystack: &'h str) -> Cow<'h, str> {
        self.regex.replace_all(haystack, "")
    }
}

/// Ordered, append-only list of case-insensitive strip patterns.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<CompiledPattern>,
}

impl PatternSet {
    pub fn compile<I, S>(sources: I) -> Result<Self, CsvLoadError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::default();
        for source in sources {
            set.push(source.as_ref())?;
        }
        debug!("Compiled {} strip pattern(s).", set.len());
        Ok(set)
    }

    /// Compiles and appends a pattern.
    pub fn push(&mut self, pattern: &str) -> Result<(), CsvLoadError> {
        let compiled = CompiledPattern::new(pattern, true)?;
        self.patterns.push(compiled);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledPattern> {
        self.patterns.iter()
    }

    pub fn sources(&self) -> Vec<String> {
        self.patterns.iter().map(|p| p.source.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// A custom substitution ready to apply.
#[derive(Debug, Clone)]
pub struct CompiledReplacement {
    pub pattern: CompiledPattern,
    pub replace_with: String,
}

/// Ordered custom substitutions. Re-adding a pattern replaces its text in place.
#[derive(Debug, Clone, Default)]
pub struct ReplacementSet {
    replacements: Vec<CompiledReplacement>,
}

impl ReplacementSet {
    pub fn compile(replacements: &Replacements) -> Result<Self, CsvLoadError> {
        let mut set = Self::default();
        for r in replacements.iter() {
            set.upsert(&r.pattern, &r.replace_with)?;
        }
        Ok(set)
    }

    pub fn upsert(&mut self, pattern: &str, replace_with: &str) -> Result<(), CsvLoadError> {
        if let Some(existing) = self
            .replacements
            .iter_mut()
            .find(|r| r.pattern.source() == pattern)
        {
            existing.replace_with = replace_with.to_string();
            return Ok(());
        }

        let compiled = CompiledPattern::new(pattern, true)?;
        self.replacements.push(CompiledReplacement {
            pattern: compiled,
            replace_with: replace_with.to_string(),
        });
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompiledReplacement> {
        self.replacements.iter()
    }

    pub fn to_replacements(&self) -> Replacements {
        self.replacements
            .iter()
            .map(|r| (r.pattern.source().to_string(), r.replace_with.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }
}

/// Compiles an optional, case-sensitive rule. An empty pattern disables the rule.
pub fn compile_optional(pattern: &str) -> Result<Option<CompiledPattern>, CsvLoadError> {
    if pattern.is_empty() {
        return Ok(None);
    }
    CompiledPattern::new(pattern, false).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_push_leaves_set_unchanged() {
        let mut set = PatternSet::compile(["_final$"]).unwrap();
        let err = set.push("([unclosed").unwrap_err();
        assert!(matches!(err, CsvLoadError::PatternCompilation(ref p, _) if p == "([unclosed"));
        assert_eq!(set.sources(), vec!["_final$".to_string()]);
    }

    #[test]
    fn overlong_pattern_is_rejected() {
        let pattern = "a".repeat(MAX_PATTERN_LENGTH + 1);
        let err = CompiledPattern::new(&pattern, true).unwrap_err();
        assert!(matches!(err, CsvLoadError::PatternLengthExceeded(_, len, max) if len == MAX_PATTERN_LENGTH + 1 && max == MAX_PATTERN_LENGTH));
    }

    #[test]
    fn replacement_text_is_literal() {
        let pattern = CompiledPattern::new("(cust)", true).unwrap();
        assert_eq!(pattern.replace_all("CUST_list", "$1er"), "$1er_list");
    }

    #[test]
    fn upsert_keeps_position() {
        let mut set = ReplacementSet::default();
        set.upsert("a", "1").unwrap();
        set.upsert("b", "2").unwrap();
        set.upsert("a", "3").unwrap();
        let texts: Vec<&str> = set.iter().map(|r| r.replace_with.as_str()).collect();
        assert_eq!(texts, vec!["3", "2"]);
    }

    #[test]
    fn empty_optional_rule_is_disabled() {
        assert!(compile_optional("").unwrap().is_none());
        assert!(compile_optional(r"[\s]+").unwrap().is_some());
    }
}
