// csvload/src/ui/mod.rs
//! Terminal output: status messages on stderr and name reports on stdout.

pub mod output_format;
pub mod report;
