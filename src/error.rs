//! Error types for the stub runtime.
//!
//! `StubError` covers the failures that can happen inside the library itself:
//! loading and validating configuration, and installing the tracing subscriber.
//! None of these ever cross the C ABI. The exported functions report
//! fabricated `axclError` codes; internal errors are logged and the runtime
//! falls back to defaults.
//!
//! - **`Config`**: Wraps errors from `figment`, typically a malformed TOML file
//!   or an environment variable with the wrong type.
//! - **`InvalidConfig`**: Values that parse but make no sense, such as a
//!   failure rate of 1.5 or an unknown log level.
//! - **`Tracing`**: The subscriber could not be installed.

use thiserror::Error;

/// Convenience alias for results using the stub error type.
pub type StubResult<T> = std::result::Result<T, StubError>;

/// Errors raised inside the stub runtime.
#[derive(Error, Debug)]
pub enum StubError {
    /// Configuration sources could not be read or extracted.
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    /// Configuration parsed but failed validation.
    #[error("Configuration validation error: {0}")]
    InvalidConfig(String),

    /// Tracing subscriber setup failed.
    #[error("Tracing error: {0}")]
    Tracing(String),
}

impl From<figment::Error> for StubError {
    fn from(err: figment::Error) -> Self {
        StubError::Config(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = StubError::InvalidConfig("history_capacity must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration validation error: history_capacity must be at least 1"
        );
    }

    #[test]
    fn test_figment_error_converts() {
        let err: StubError = figment::Error::from("bad value".to_string()).into();
        assert!(matches!(err, StubError::Config(_)));
        assert!(err.to_string().contains("bad value"));
    }
}
