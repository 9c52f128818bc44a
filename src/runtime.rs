//! Process-wide stub runtime.
//!
//! The exported functions have no context argument, so the randomizer, the
//! serializer and the active status policy live in one lazily-built
//! [`StubRuntime`]. It is created on the first stub call: configuration is
//! loaded, tracing is installed, and the randomizer is seeded.

use crate::config::StubConfig;
use crate::error::{StubError, StubResult};
use crate::randomizer::{Randomizer, StatusPolicy};
use crate::serializer::Serializer;
use crate::tracing_setup;
use axcl_sys::axclError;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

static RUNTIME: Lazy<StubRuntime> = Lazy::new(StubRuntime::bootstrap);

/// Shared state behind every exported stub function.
#[derive(Debug)]
pub struct StubRuntime {
    config: StubConfig,
    randomizer: Randomizer,
    serializer: Serializer,
    status_policy: RwLock<StatusPolicy>,
}

impl StubRuntime {
    /// Build a runtime from an explicit configuration without touching globals.
    pub fn with_config(config: StubConfig) -> Self {
        Self {
            randomizer: Randomizer::new(config.seed),
            serializer: Serializer::new(config.history_capacity),
            status_policy: RwLock::new(config.status),
            config,
        }
    }

    fn bootstrap() -> Self {
        let (config, load_error) = match Self::load_config() {
            Ok(config) => (config, None),
            Err(e) => (StubConfig::default(), Some(e)),
        };

        if let Some(e) = Self::install_tracing(&config) {
            tracing::warn!(error = %e, "stub tracing subscriber not installed");
        }

        if let Some(e) = load_error {
            tracing::warn!(error = %e, path = ?StubConfig::config_path(), "falling back to default stub configuration");
        }

        tracing::info!(
            seed = ?config.seed,
            status = ?config.status,
            history_capacity = config.history_capacity,
            "axcl stub runtime ready"
        );

        Self::with_config(config)
    }

    fn install_tracing(config: &StubConfig) -> Option<StubError> {
        if !config.install_subscriber {
            return None;
        }
        tracing_setup::init_from_config(config).err()
    }

    fn load_config() -> StubResult<StubConfig> {
        let config = StubConfig::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration the runtime was built from.
    pub fn config(&self) -> &StubConfig {
        &self.config
    }

    /// The value randomizer.
    pub fn randomizer(&self) -> &Randomizer {
        &self.randomizer
    }

    /// The call-trace serializer.
    pub fn serializer(&self) -> &Serializer {
        &self.serializer
    }

    /// Policy currently used for fabricated status codes.
    pub fn status_policy(&self) -> StatusPolicy {
        *self.status_policy.read()
    }

    /// Replace the status policy for subsequent calls.
    pub fn set_status_policy(&self, policy: StatusPolicy) {
        tracing::debug!(?policy, "status policy changed");
        *self.status_policy.write() = policy;
    }

    /// Return to the configured policy, history bound and seed, and drop the trace.
    pub fn restore_defaults(&self) {
        let config = self.config();
        self.set_status_policy(config.status);
        self.serializer.set_capacity(config.history_capacity);
        if let Some(seed) = config.seed {
            self.randomizer.reseed(seed);
        }
        self.serializer.clear();
    }

    /// Fabricate a status code under the current policy.
    pub fn fabricate_status(&self) -> axclError {
        self.randomizer.status(self.status_policy())
    }
}

/// The process-wide runtime, built on first use.
pub fn runtime() -> &'static StubRuntime {
    &RUNTIME
}
