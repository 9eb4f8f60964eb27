//! The individual transformations that turn a filename into a table name.
//!
//! Each stage is a plain function over `&str`, so it can be tested on its own. The
//! order is fixed by [`Stage::PIPELINE`]; later stages assume the normalization done by
//! earlier ones (for example, `RemoveChars` relies on whitespace already being turned
//! into underscores).

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::path::Path;

use crate::config::FALLBACK_TABLE_NAME;
use crate::sanitizers::compiler::{CompiledPattern, PatternSet, ReplacementSet};

static UNDERSCORE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").expect("static underscore regex"));

/// One step of the sanitization pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    StripExtension,
    CustomReplacements,
    StripPatterns,
    ReplaceWithUnderscore,
    RemoveChars,
    CollapseUnderscores,
    TrimUnderscores,
    PascalCase,
    LeadingCharacter,
    Truncate,
    Fallback,
}

impl Stage {
    /// Every stage, in the order the sanitizer applies them.
    pub const PIPELINE: [Stage; 11] = [
        Stage::StripExtension,
        Stage::CustomReplacements,
        Stage::StripPatterns,
        Stage::ReplaceWithUnderscore,
        Stage::RemoveChars,
        Stage::CollapseUnderscores,
        Stage::TrimUnderscores,
        Stage::PascalCase,
        Stage::LeadingCharacter,
        Stage::Truncate,
        Stage::Fallback,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::StripExtension => "strip_extension",
            Stage::CustomReplacements => "custom_replacements",
            Stage::StripPatterns => "strip_patterns",
            Stage::ReplaceWithUnderscore => "replace_with_underscore",
            Stage::RemoveChars => "remove_chars",
            Stage::CollapseUnderscores => "collapse_underscores",
            Stage::TrimUnderscores => "trim_underscores",
            Stage::PascalCase => "pascal_case",
            Stage::LeadingCharacter => "leading_character",
            Stage::Truncate => "truncate",
            Stage::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returns the final path component without its extension.
///
/// Directory components are dropped. A dot-file such as `.hidden` keeps its full name.
pub fn strip_extension(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Applies each replacement in order; every one sees the output of the previous.
pub fn apply_replacements(name: &str, replacements: &ReplacementSet) -> String {
    replacements.iter().fold(name.to_string(), |current, r| {
        r.pattern.replace_all(&current, &r.replace_with).into_owned()
    })
}

/// Removes every match of every pattern, in list order.
///
/// The ordered pass is repeated until it no longer changes the name, so stacked noise
/// such as `_v2_backup_001` is removed completely. Each changing pass shortens the
/// string, which bounds the loop.
///
/// Cost: one pass is linear in the name length per pattern, and there can be up to one
/// pass per removed character, so the worst case is quadratic in the name length.
/// Filenames are short, so this is not bounded further.
pub fn strip_patterns(name: &str, patterns: &PatternSet) -> String {
    let mut current = name.to_string();
    loop {
        let next = patterns
            .iter()
            .fold(current.clone(), |acc, p| p.remove_all(&acc).into_owned());
        if next == current {
            return current;
        }
        current = next;
    }
}

pub fn replace_with_underscore(name: &str, rule: Option<&CompiledPattern>) -> String {
    match rule {
        Some(rule) => rule.replace_all(name, "_").into_owned(),
        None => name.to_string(),
    }
}

pub fn remove_chars(name: &str, rule: Option<&CompiledPattern>) -> String {
    match rule {
        Some(rule) => rule.remove_all(name).into_owned(),
        None => name.to_string(),
    }
}

pub fn collapse_underscores(name: &str) -> String {
    UNDERSCORE_RUN.replace_all(name, "_").into_owned()
}

pub fn trim_underscores(name: &str) -> String {
    name.trim_matches('_').to_string()
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Converts `customer_account` to `CustomerAccount`.
///
/// Only the first character of each part is upper-cased; the rest keeps its case. A name
/// without underscores is left alone when it already starts upper-case.
pub fn to_pascal_case(name: &str) -> String {
    if name.contains('_') {
        return name
            .split('_')
            .filter(|part| !part.is_empty())
            .map(capitalize_first)
            .collect();
    }

    match name.chars().next() {
        Some(first) if first.is_uppercase() => name.to_string(),
        Some(_) => capitalize_first(name),
        None => String::new(),
    }
}

/// Prepends `_` when the name starts with anything but a letter or underscore.
pub fn ensure_leading_character(name: &str) -> String {
    match name.chars().next() {
        Some(first) if !first.is_alphabetic() && first != '_' => format!("_{}", name),
        _ => name.to_string(),
    }
}

/// Hard cut to `max_length` characters.
pub fn truncate(name: &str, max_length: usize) -> String {
    name.chars().take(max_length).collect()
}

/// Substitutes the fallback name for an empty result.
pub fn fallback(name: &str, max_length: usize) -> String {
    if name.is_empty() {
        truncate(FALLBACK_TABLE_NAME, max_length)
    } else {
        name.to_string()
    }
}
