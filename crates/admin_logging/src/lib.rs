#![deny(missing_docs)]
//! Shared logging utilities for the scraper admin workspace.
//!
//! This crate provides the `admin_*` logging macros used across the codebase,
//! the level mapping for `-v` style verbosity flags and a minimal test
//! initializer for the global logger.

use log::LevelFilter;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! admin_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! admin_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! admin_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! admin_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! admin_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Maps a repeated `-v` count to a level filter.
///
/// Zero flags keep warnings and errors only; each flag opens one more level.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Environment variable holding a `-v` style count for test logging.
pub const TEST_VERBOSITY_ENV: &str = "ADMIN_TEST_LOG";

/// Installs a stderr logger for tests.
///
/// Verbosity is read from `ADMIN_TEST_LOG` (default 2, debug). Safe to call
/// from many tests; only the first logger installed wins.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

    let verbosity = std::env::var(TEST_VERBOSITY_ENV)
        .ok()
        .and_then(|raw| raw.trim().parse::<u8>().ok())
        .unwrap_or(2);
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .build();
    let _ = TermLogger::init(
        level_for_verbosity(verbosity),
        config,
        TerminalMode::Stderr,
        ColorChoice::Never,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_opens_levels_progressively() {
        assert_eq!(level_for_verbosity(0), LevelFilter::Warn);
        assert_eq!(level_for_verbosity(1), LevelFilter::Info);
        assert_eq!(level_for_verbosity(2), LevelFilter::Debug);
        assert_eq!(level_for_verbosity(9), LevelFilter::Trace);
    }
}
