//! Rule compilation and the transformation stages of the filename sanitizer.
//!
//! `compiler` turns the string rules from `config` into regexes that carry their own
//! source text. `stages` holds one function per pipeline step; the `PatternSanitizer`
//! engine drives them in order.

pub mod compiler;
pub mod stages;
