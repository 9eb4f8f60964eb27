// csvload-core/src/engine.rs
//! Defines the `NameSanitizer` trait.
//!
//! The resolver only needs two things from a sanitizer: turn a filename into a name, and
//! say whether a name is a valid identifier. Keeping that behind a trait lets the resolver
//! be driven by the regex-based `PatternSanitizer` or by anything else with the same
//! contract.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;

/// Converts filenames into table-name candidates.
///
/// Implementations must be pure over `&self`: the same input always yields the same
/// output, and concurrent calls from several threads are allowed.
pub trait NameSanitizer: Send + Sync {
    /// Sanitizes `filename` (with or without extension). Never fails; the result is
    /// non-empty and bounded by the sanitizer's maximum length.
    fn sanitize(&self, filename: &str) -> String;

    /// Returns `true` if `name` is a valid table identifier.
    fn validate(&self, name: &str) -> bool;

    /// Sanitizes several filenames, keyed by the original filename.
    fn sanitize_batch<S: AsRef<str>>(&self, filenames: &[S]) -> HashMap<String, String>
    where
        Self: Sized,
    {
        filenames
            .iter()
            .map(|f| (f.as_ref().to_string(), self.sanitize(f.as_ref())))
            .collect()
    }
}
