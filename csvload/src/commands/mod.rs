// csvload/src/commands/mod.rs
//! Subcommand implementations.

pub mod names;
pub mod sanitize;
