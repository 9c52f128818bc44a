//! Tracing infrastructure
//!
//! The stub is usually loaded as a shared library into someone else's test
//! process, so it installs its own `tracing-subscriber` output on first use.
//! Filtering honours `RUST_LOG` first and falls back to the configured level.
//! If the host process already set a global subscriber, that one wins and
//! initialization is a no-op.
//!
//! # Example
//! ```no_run
//! use axcl_stub::tracing_setup::{self, OutputFormat, TracingConfig};
//! use tracing::Level;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TracingConfig::new(Level::DEBUG).with_format(OutputFormat::Json);
//! tracing_setup::init(config)?;
//! # Ok(())
//! # }
//! ```

use crate::config::StubConfig;
use crate::error::{StubError, StubResult};
use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

/// Output format for tracing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed format with colors (for development)
    Pretty,
    /// Single-line format without colors
    #[default]
    Compact,
    /// JSON format for log aggregation
    Json,
}

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Log level used when `RUST_LOG` is unset
    pub level: Level,
    /// Output format
    pub format: OutputFormat,
    /// Whether to include file and line numbers
    pub with_file_and_line: bool,
    /// Whether to include thread IDs
    pub with_thread_ids: bool,
    /// Whether to enable ANSI colors (only for Pretty format)
    pub with_ansi: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: OutputFormat::Compact,
            with_file_and_line: false,
            with_thread_ids: true,
            with_ansi: true,
        }
    }
}

impl TracingConfig {
    /// Create tracing config from the stub configuration
    pub fn from_stub_config(config: &StubConfig) -> StubResult<Self> {
        let level = parse_log_level(&config.log_level)?;

        Ok(Self {
            level,
            format: config.log_format,
            ..Default::default()
        })
    }

    /// Create tracing config with custom settings
    pub fn new(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Set output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable ANSI colors
    pub fn with_ansi(mut self, enabled: bool) -> Self {
        self.with_ansi = enabled;
        self
    }
}

/// Initialize tracing from the stub configuration
pub fn init_from_config(config: &StubConfig) -> StubResult<()> {
    init(TracingConfig::from_stub_config(config)?)
}

/// Initialize tracing with custom configuration
///
/// Idempotent: if a global subscriber is already installed this returns `Ok(())`.
pub fn init(config: TracingConfig) -> StubResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_string(config.level)));

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        OutputFormat::Pretty => fmt::layer()
            .pretty()
            .with_file(config.with_file_and_line)
            .with_line_number(config.with_file_and_line)
            .with_thread_ids(config.with_thread_ids)
            .with_ansi(config.with_ansi)
            .with_writer(std::io::stderr)
            .boxed(),
        OutputFormat::Compact => fmt::layer()
            .compact()
            .with_file(config.with_file_and_line)
            .with_line_number(config.with_file_and_line)
            .with_thread_ids(config.with_thread_ids)
            .with_ansi(false)
            .with_writer(std::io::stderr)
            .boxed(),
        OutputFormat::Json => fmt::layer()
            .json()
            .with_file(config.with_file_and_line)
            .with_line_number(config.with_file_and_line)
            .with_thread_ids(config.with_thread_ids)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(env_filter))
        .try_init()
        .or_else(|e| {
            // Host process (or an earlier call) already owns the global dispatcher
            if e
                .to_string()
                .contains("a global default trace dispatcher has already been set")
            {
                Ok(())
            } else {
                Err(StubError::Tracing(format!(
                    "Failed to initialize tracing: {}",
                    e
                )))
            }
        })
}

/// Parse log level string into tracing Level
pub fn parse_log_level(level: &str) -> StubResult<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(StubError::InvalidConfig(format!(
            "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
            level
        ))),
    }
}

fn level_to_filter_string(level: Level) -> String {
    match level {
        Level::TRACE => "trace".to_string(),
        Level::DEBUG => "debug".to_string(),
        Level::INFO => "info".to_string(),
        Level::WARN => "warn".to_string(),
        Level::ERROR => "error".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert!(matches!(parse_log_level("trace"), Ok(Level::TRACE)));
        assert!(matches!(parse_log_level("debug"), Ok(Level::DEBUG)));
        assert!(matches!(parse_log_level("info"), Ok(Level::INFO)));
        assert!(matches!(parse_log_level("warn"), Ok(Level::WARN)));
        assert!(matches!(parse_log_level("error"), Ok(Level::ERROR)));

        // Case insensitive
        assert!(matches!(parse_log_level("INFO"), Ok(Level::INFO)));
        assert!(matches!(parse_log_level("Debug"), Ok(Level::DEBUG)));

        assert!(parse_log_level("invalid").is_err());
    }

    #[test]
    fn test_tracing_config_from_stub_config() {
        let stub_config = StubConfig {
            log_level: "debug".to_string(),
            log_format: OutputFormat::Json,
            ..Default::default()
        };

        let tracing_config = TracingConfig::from_stub_config(&stub_config).unwrap();
        assert!(matches!(tracing_config.level, Level::DEBUG));
        assert_eq!(tracing_config.format, OutputFormat::Json);
    }

    #[test]
    fn test_tracing_config_builder() {
        let config = TracingConfig::new(Level::ERROR)
            .with_format(OutputFormat::Pretty)
            .with_ansi(false);

        assert!(matches!(config.level, Level::ERROR));
        assert_eq!(config.format, OutputFormat::Pretty);
        assert!(!config.with_ansi);
    }

    #[test]
    fn test_init_is_idempotent() {
        let config = TracingConfig::new(Level::ERROR).with_format(OutputFormat::Compact);
        assert!(init(config.clone()).is_ok());
        assert!(init(config).is_ok());
    }
}
