//! Structured logging setup
//!
//! Installs a `tracing` subscriber that writes to stderr, so the generated
//! script can go to stdout untouched.
//!
//! # Example
//!
//! ```no_run
//! use pystartup::util::logging;
//!
//! logging::init_logging(logging::LoggingConfig::from_env());
//!
//! tracing::info!("Application started");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g., pystartup::generator) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Reads `PYSTARTUP_LOG_LEVEL` (default `info`) and `PYSTARTUP_LOG_JSON`
    pub fn from_env() -> Self {
        let level_str = env::var("PYSTARTUP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        Self::with_level(parse_level(&level_str)).with_json(json_from_env())
    }

    pub fn with_json(mut self, use_json: bool) -> Self {
        self.use_json = use_json;
        self
    }
}

/// Parses a log level from a string
///
/// Unknown values fall back to `Level::INFO` with a note on stderr.
///
/// ```
/// use pystartup::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("debug"), Level::DEBUG);
/// assert_eq!(parse_level("INFO"), Level::INFO);
/// assert_eq!(parse_level("invalid"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

/// `PYSTARTUP_LOG_JSON=true` switches to JSON output
pub fn json_from_env() -> bool {
    env::var("PYSTARTUP_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false)
}

/// Builds the filter. `RUST_LOG`, when set, wins over the configured level.
fn build_filter(level: Level) -> EnvFilter {
    if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(format!("pystartup={}", level))
    }
}

/// Initializes the logging system. Only the first call has an effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("debug"), Level::DEBUG);
        assert_eq!(parse_level("info"), Level::INFO);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("error"), Level::ERROR);
    }

    #[test]
    fn test_parse_level_case_insensitive() {
        assert_eq!(parse_level("TRACE"), Level::TRACE);
        assert_eq!(parse_level("Debug"), Level::DEBUG);
    }

    #[test]
    fn test_parse_level_invalid() {
        assert_eq!(parse_level("verbose"), Level::INFO);
        assert_eq!(parse_level(""), Level::INFO);
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.use_json);
        assert!(config.include_target);
        assert!(!config.include_location);
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        env::remove_var("PYSTARTUP_LOG_LEVEL");
        env::remove_var("PYSTARTUP_LOG_JSON");
        let config = LoggingConfig::from_env();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.use_json);

        env::set_var("PYSTARTUP_LOG_LEVEL", "warn");
        env::set_var("PYSTARTUP_LOG_JSON", "true");
        let config = LoggingConfig::from_env();
        assert_eq!(config.level, Level::WARN);
        assert!(config.use_json);

        env::remove_var("PYSTARTUP_LOG_LEVEL");
        env::remove_var("PYSTARTUP_LOG_JSON");
    }

    #[test]
    #[serial]
    fn test_json_from_env() {
        env::remove_var("PYSTARTUP_LOG_JSON");
        assert!(!json_from_env());

        env::set_var("PYSTARTUP_LOG_JSON", "true");
        assert!(json_from_env());

        env::set_var("PYSTARTUP_LOG_JSON", "yes");
        assert!(!json_from_env());

        env::remove_var("PYSTARTUP_LOG_JSON");
    }
}
