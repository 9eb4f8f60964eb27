// csvload-core/src/engines/mod.rs
//! Concrete `NameSanitizer` implementations.
//!
//! # License
//! MIT OR Apache-2.0

pub mod pattern_sanitizer;
