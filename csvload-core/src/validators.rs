// File: csvload-core/src/validators.rs
//! Identifier validation and the character policies applied to names and prefixes.
//!
//! Table bodies and table prefixes are held to different character classes. A body may
//! contain `@`, `$` and `#`, which SQL Server accepts in a regular identifier, while a
//! prefix is restricted to letters, digits and underscores. Both policies live here as
//! separate values so either can be tuned without touching the other.
//!
//! License: MIT OR APACHE 2.0

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashSet;

/// SQL Server's limit on identifier length, in characters.
pub const MAX_IDENTIFIER_LENGTH: usize = 128;

static BODY_CHARS: Lazy<HashSet<char>> = Lazy::new(|| {
    let mut set: HashSet<char> = ('a'..='z').chain('A'..='Z').chain('0'..='9').collect();
    set.extend(['_', '@', '$', '#']);
    set
});

static BODY_LEADING_SYMBOLS: Lazy<HashSet<char>> = Lazy::new(|| ['_', '@', '#'].into_iter().collect());

// `\w` is Unicode-aware, so non-ASCII letters and digits survive.
static PREFIX_DISALLOWED: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w]").expect("static prefix regex"));
static PREFIX_DISALLOWED_ASCII: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]").expect("static ascii prefix regex"));

/// Character policy for a complete table name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierPolicy {
    pub max_length: usize,
}

impl Default for IdentifierPolicy {
    fn default() -> Self {
        Self { max_length: MAX_IDENTIFIER_LENGTH }
    }
}

impl IdentifierPolicy {
    /// Returns `true` when `name` is a valid regular identifier.
    ///
    /// A valid name is non-empty, at most `max_length` characters, starts with a letter,
    /// `_`, `@` or `#`, and contains only ASCII letters, digits, `_`, `@`, `$` and `#`.
    pub fn is_valid(&self, name: &str) -> bool {
        let Some(first) = name.chars().next() else {
            return false;
        };

        if name.chars().count() > self.max_length {
            return false;
        }

        if !(first.is_ascii_alphabetic() || BODY_LEADING_SYMBOLS.contains(&first)) {
            return false;
        }

        name.chars().all(|c| BODY_CHARS.contains(&c))
    }
}

/// Character policy for a table prefix.
///
/// The default keeps Unicode word characters and prepends `_` to a prefix that starts
/// with a digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixPolicy {
    /// Keep only ASCII letters, digits and `_` instead of any word character.
    pub ascii_only: bool,
    /// Prepend `_` when the cleaned prefix starts with a digit.
    pub guard_leading_digit: bool,
}

impl Default for PrefixPolicy {
    fn default() -> Self {
        Self {
            ascii_only: false,
            guard_leading_digit: true,
        }
    }
}

impl PrefixPolicy {
    /// Strips disallowed characters and, if enabled, guards against a leading digit.
    ///
    /// An empty result means no prefix should be applied.
    pub fn sanitize<'a>(&self, prefix: &'a str) -> Cow<'a, str> {
        if prefix.is_empty() {
            return Cow::Borrowed(prefix);
        }

        let disallowed = if self.ascii_only { &*PREFIX_DISALLOWED_ASCII } else { &*PREFIX_DISALLOWED };
        let sanitized = disallowed.replace_all(prefix, "");
        if self.guard_leading_digit && sanitized.starts_with(|c: char| c.is_ascii_digit()) {
            Cow::Owned(format!("_{}", sanitized))
        } else {
            sanitized
        }
    }
}

/// Validates a table name against the default [`IdentifierPolicy`].
pub fn is_valid_table_name(name: &str) -> bool {
    IdentifierPolicy::default().is_valid(name)
}

/// Sanitizes a prefix with the default [`PrefixPolicy`].
pub fn sanitize_prefix(prefix: &str) -> String {
    PrefixPolicy::default().sanitize(prefix).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_leading_digit() {
        assert!(!is_valid_table_name("1abc"));
    }

    #[test]
    fn accepts_leading_symbols() {
        assert!(is_valid_table_name("_abc"));
        assert!(is_valid_table_name("@abc"));
        assert!(is_valid_table_name("#temp"));
        assert!(!is_valid_table_name("$abc"));
    }

    #[test]
    fn dollar_is_allowed_after_the_first_char() {
        assert!(is_valid_table_name("a$b"));
    }

    #[test]
    fn length_boundary() {
        assert!(is_valid_table_name(&"a".repeat(128)));
        assert!(!is_valid_table_name(&"a".repeat(129)));
    }

    #[test]
    fn rejects_empty_and_punctuation() {
        assert!(!is_valid_table_name(""));
        assert!(!is_valid_table_name("sales-data"));
        assert!(!is_valid_table_name("sales data"));
        assert!(!is_valid_table_name("Café"));
    }

    #[test]
    fn prefix_sanitization() {
        let cases = [
            ("tbl_", "tbl_"),
            ("staging_", "staging_"),
            ("123_", "_123_"),
            ("tbl-test", "tbltest"),
            ("tbl@test", "tbltest"),
            ("tbl test", "tbltest"),
            ("tbl.test", "tbltest"),
            ("$tbl_", "tbl_"),
            ("test_123_", "test_123_"),
            ("", ""),
            ("-.-", ""),
        ];
        for (input, expected) in cases {
            assert_eq!(sanitize_prefix(input), expected, "prefix {:?}", input);
        }
    }

    #[test]
    fn ascii_only_prefix_drops_accents() {
        let policy = PrefixPolicy { ascii_only: true, ..Default::default() };
        assert_eq!(policy.sanitize("café_"), "caf_");
        assert_eq!(PrefixPolicy::default().sanitize("café_"), "café_");
    }

    #[test]
    fn leading_digit_guard_can_be_disabled() {
        let policy = PrefixPolicy { guard_leading_digit: false, ..Default::default() };
        assert_eq!(policy.sanitize("123_"), "123_");
        assert_eq!(PrefixPolicy::default().sanitize("123_"), "_123_");
    }
}
