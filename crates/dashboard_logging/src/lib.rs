#![deny(missing_docs)]
//! Shared logging utilities for the dashboard workspace.
//!
//! This crate provides the `dashboard_*` logging macros used across the
//! codebase, a helper for keeping credentials out of log lines, and a
//! minimal test initializer for the global logger.

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! dashboard_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! dashboard_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! dashboard_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! dashboard_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! dashboard_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Masks a secret for logging, keeping only its last four characters.
///
/// Secrets of four characters or fewer are masked completely.
pub fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

/// Environment variable selecting the test log level (`trace` to `off`).
pub const TEST_LOG_ENV: &str = "DASHBOARD_TEST_LOG";

/// Installs a stderr logger for tests, at `DASHBOARD_TEST_LOG` or `warn`.
///
/// No-ops when a logger is already installed.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

    let level = std::env::var(TEST_LOG_ENV)
        .ok()
        .and_then(|raw| raw.trim().parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Warn);
    let config = ConfigBuilder::new()
        .set_time_level(log::LevelFilter::Off)
        .build();

    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Never);
}

#[cfg(test)]
mod tests {
    use super::redact;

    #[test]
    fn redact_keeps_only_the_tail() {
        assert_eq!(redact("abcdefgh"), "****efgh");
        assert_eq!(redact("abc"), "****");
        assert_eq!(redact(""), "****");
    }
}
