//! Logger setup for bakery-admin.
//!
//! The terminal logger writes to stderr so table output on stdout stays
//! clean; the file logger truncates its file on every start.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

pub const DEFAULT_LOG_FILE: &str = "./dashboard.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogDestination {
    #[default]
    File,
    Terminal,
    Both,
}

impl LogDestination {
    fn to_terminal(self) -> bool {
        matches!(self, LogDestination::Terminal | LogDestination::Both)
    }

    fn to_file(self) -> bool {
        matches!(self, LogDestination::File | LogDestination::Both)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub destination: LogDestination,
    pub level: LevelFilter,
    pub file: PathBuf,
}

/// Maps `-v` repetitions onto a level; the default keeps the terminal quiet.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the global logger; a second call leaves the first in place.
pub fn initialize(settings: &LogSettings) {
    let loggers = build_loggers(settings);
    if loggers.is_empty() {
        return;
    }
    let _ = CombinedLogger::init(loggers);
}

fn build_loggers(settings: &LogSettings) -> Vec<Box<dyn SharedLogger>> {
    let config = build_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if settings.destination.to_terminal() {
        loggers.push(TermLogger::new(
            settings.level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }
    if settings.destination.to_file() {
        if let Some(file_logger) = create_file_logger(&settings.file, settings.level, config) {
            loggers.push(file_logger);
        }
    }
    loggers
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: could not create log file at {:?}: {}", path, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_the_level() {
        assert_eq!(level_for_verbosity(0), LevelFilter::Warn);
        assert_eq!(level_for_verbosity(2), LevelFilter::Debug);
        assert_eq!(level_for_verbosity(9), LevelFilter::Trace);
    }

    #[test]
    fn both_writes_to_terminal_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LogSettings {
            destination: LogDestination::Both,
            level: LevelFilter::Info,
            file: dir.path().join("dashboard.log"),
        };
        assert_eq!(build_loggers(&settings).len(), 2);
        assert!(settings.file.exists());
    }

    #[test]
    fn unwritable_log_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LogSettings {
            destination: LogDestination::File,
            level: LevelFilter::Info,
            file: dir.path().join("missing").join("dashboard.log"),
        };
        assert!(build_loggers(&settings).is_empty());
    }
}
