//! Stub configuration using Figment
//!
//! Configuration is merged from, in increasing priority:
//! 1. Built-in defaults
//! 2. A TOML file (`AXCL_STUB_CONFIG`, or `axcl_stub.toml` in the working directory)
//! 3. Environment variables prefixed with `AXCL_STUB_`
//!
//! A missing file is not an error, so a bare `libaxcl_stub` works with no setup.
//!
//! # Example
//! ```no_run
//! use axcl_stub::config::StubConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StubConfig::load()?;
//! config.validate()?;
//! println!("seed: {:?}", config.seed);
//! # Ok(())
//! # }
//! ```

use crate::error::{StubError, StubResult};
use crate::randomizer::StatusPolicy;
use crate::tracing_setup::OutputFormat;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "AXCL_STUB_CONFIG";

/// Config file looked up in the working directory when `AXCL_STUB_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "axcl_stub.toml";

/// Prefix of environment overrides, e.g. `AXCL_STUB_SEED=42`.
pub const ENV_PREFIX: &str = "AXCL_STUB_";

const MAX_HISTORY_CAPACITY: usize = 65_536;

/// Runtime settings of the stub library
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StubConfig {
    /// Fixed randomizer seed; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Logging level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log output format
    #[serde(default)]
    pub log_format: OutputFormat,
    /// Install a global tracing subscriber on first use
    #[serde(default = "default_install_subscriber")]
    pub install_subscriber: bool,
    /// Number of call records kept in the trace history
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
    /// How fabricated status codes are drawn
    #[serde(default)]
    pub status: StatusPolicy,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_install_subscriber() -> bool {
    true
}

fn default_history_capacity() -> usize {
    64
}

impl Default for StubConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_level: default_log_level(),
            log_format: OutputFormat::default(),
            install_subscriber: default_install_subscriber(),
            history_capacity: default_history_capacity(),
            status: StatusPolicy::default(),
        }
    }
}

impl StubConfig {
    /// Load configuration from the default file location and environment.
    pub fn load() -> StubResult<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from a specific file path, then apply environment overrides.
    pub fn load_from<P: AsRef<Path>>(path: P) -> StubResult<Self> {
        let config = Figment::from(Serialized::defaults(StubConfig::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]))
            .extract()?;
        Ok(config)
    }

    /// Path of the config file to read.
    pub fn config_path() -> PathBuf {
        std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> StubResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(StubError::InvalidConfig(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            )));
        }

        if self.history_capacity == 0 || self.history_capacity > MAX_HISTORY_CAPACITY {
            return Err(StubError::InvalidConfig(format!(
                "Invalid history_capacity {}. Must be 1-{}",
                self.history_capacity, MAX_HISTORY_CAPACITY
            )));
        }

        if let StatusPolicy::FailureRate { rate } = self.status {
            if !(0.0..=1.0).contains(&rate) {
                return Err(StubError::InvalidConfig(format!(
                    "Invalid failure rate {}. Must be 0.0-1.0",
                    rate
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = StubConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.history_capacity, 64);
        assert_eq!(config.status, StatusPolicy::Random);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StubConfig::load_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.history_capacity, 64);
        assert_eq!(config.log_format, OutputFormat::Compact);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
seed = 1234
log_level = "debug"
log_format = "json"
history_capacity = 8

[status]
mode = "failure_rate"
rate = 0.25
"#
        )
        .unwrap();

        let config = StubConfig::load_from(file.path()).unwrap();
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, OutputFormat::Json);
        assert_eq!(config.history_capacity, 8);
        assert_eq!(config.status, StatusPolicy::FailureRate { rate: 0.25 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "history_capacity = \"lots\"").unwrap();
        assert!(matches!(
            StubConfig::load_from(file.path()),
            Err(StubError::Config(_))
        ));
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("stub.toml", "seed = 1\nlog_level = \"info\"")?;
            jail.set_env("AXCL_STUB_SEED", "99");
            jail.set_env("AXCL_STUB_STATUS", "{mode=\"success\"}");

            let config = StubConfig::load_from("stub.toml").map_err(|e| e.to_string())?;
            assert_eq!(config.seed, Some(99));
            assert_eq!(config.log_level, "info");
            assert_eq!(config.status, StatusPolicy::Success);
            Ok(())
        });
    }

    #[test]
    #[serial]
    fn test_config_path_from_env() {
        Jail::expect_with(|jail| {
            jail.set_env(CONFIG_PATH_ENV, "/etc/axcl/stub.toml");
            assert_eq!(StubConfig::config_path(), PathBuf::from("/etc/axcl/stub.toml"));
            Ok(())
        });
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let config = StubConfig {
            log_level: "verbose".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = StubConfig {
            history_capacity: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = StubConfig {
            status: StatusPolicy::FailureRate { rate: 1.5 },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_level_is_case_insensitive() {
        let config = StubConfig {
            log_level: "DEBUG".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
