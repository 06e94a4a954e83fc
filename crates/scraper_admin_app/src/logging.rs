//! Terminal and file logging for the CLI.
//!
//! Diagnostics go through `log`; command output itself is printed to stdout
//! and never passes through here.

use std::fs::{File, OpenOptions};
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

pub const LOG_FILE: &str = "scraper_admin.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogDestination {
    /// stderr only.
    Terminal,
    /// Appended to ./scraper_admin.log only.
    File,
    Both,
}

impl LogDestination {
    fn terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }

    fn file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }
}

/// Installs the global logger. A log file that cannot be opened falls back to
/// terminal output with a warning.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    let mut file_error = None;

    if destination.file() {
        match open_log_file(Path::new(LOG_FILE)) {
            Ok(file) => loggers.push(WriteLogger::new(level, build_config(), file)),
            Err(err) => file_error = Some(err),
        }
    }
    if destination.terminal() || loggers.is_empty() {
        loggers.push(TermLogger::new(
            level,
            build_config(),
            // Stdout carries command output; keep diagnostics on stderr.
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }

    let _ = CombinedLogger::init(loggers);
    if let Some(err) = file_error {
        admin_logging::admin_warn!("cannot open {LOG_FILE}: {err}; logging to terminal");
    }
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .add_filter_ignore_str("reqwest")
        .add_filter_ignore_str("hyper")
        .build()
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destinations_select_outputs() {
        assert!(LogDestination::Terminal.terminal());
        assert!(!LogDestination::Terminal.file());
        assert!(LogDestination::File.file());
        assert!(!LogDestination::File.terminal());
        assert!(LogDestination::Both.file() && LogDestination::Both.terminal());
    }

    #[test]
    fn log_file_is_appended() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join(LOG_FILE);
        std::fs::write(&path, "earlier run\n").unwrap();
        {
            use std::io::Write;
            let mut file = open_log_file(&path).unwrap();
            writeln!(file, "later run").unwrap();
        }
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "earlier run\nlater run\n"
        );
    }
}
