// csvload/src/logger.rs
//! Logger setup for the csvload binary.
//!
//! `env_logger` writes to stderr so that stdout stays reserved for the name report.
//! License: MIT OR Apache-2.0

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger once.
///
/// `Some(level)` overrides `RUST_LOG`; `None` leaves filtering to `RUST_LOG`, falling
/// back to `warn`. Calling this a second time is a no-op.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).format_target(false);
    // Tests and library callers may have installed a logger already.
    let _ = builder.try_init();
}

/// Maps a configured level name onto a `LevelFilter`.
///
/// Accepts the usual Rust names as well as `WARNING` and `CRITICAL`, which older
/// loader configurations use. Unknown names yield `None`.
pub fn level_from_name(name: &str) -> Option<LevelFilter> {
    match name.trim().to_ascii_lowercase().as_str() {
        "off" | "none" => Some(LevelFilter::Off),
        "critical" | "error" => Some(LevelFilter::Error),
        "warning" | "warn" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_map_case_insensitively() {
        assert_eq!(level_from_name("DEBUG"), Some(LevelFilter::Debug));
        assert_eq!(level_from_name("Warning"), Some(LevelFilter::Warn));
        assert_eq!(level_from_name(" critical "), Some(LevelFilter::Error));
        assert_eq!(level_from_name("verbose"), None);
    }
}
