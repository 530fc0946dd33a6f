//! Simulator configuration parameters
//!
//! Everything a learning session may tune before constructing a controller.
//! Loaded from JSON by the host harness, or taken from `Default`.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Hard upper bound on the registry size (fixed-capacity storage).
pub const MAX_PUMPS: usize = 16;

/// Registry size used when nothing else is configured.
pub const DEFAULT_PUMP_COUNT: usize = 4;

/// Core simulator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of pumps in the registry (fixed for the controller's lifetime)
    pub pump_count: usize,
    /// Settings for the system-under-learning adapter
    pub learning: LearningConfig,
}

/// Knobs for [`crate::sul::PumpsSystemSul`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// RNG seed for target/value selection; `None` draws a fresh one.
    pub seed: Option<u64>,
    /// Advance the simulation after every step, not only in `post()`.
    pub tick_per_step: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            pump_count: DEFAULT_PUMP_COUNT,
            learning: LearningConfig::default(),
        }
    }
}

/// Errors from loading or validating a [`SimConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Input was not valid JSON for this schema.
    Malformed,
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "config malformed"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl SimConfig {
    /// Reject out-of-range values instead of clamping them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pump_count == 0 {
            return Err(ConfigError::ValidationFailed("pump_count must be at least 1"));
        }
        if self.pump_count > MAX_PUMPS {
            return Err(ConfigError::ValidationFailed("pump_count exceeds MAX_PUMPS"));
        }
        Ok(())
    }

    /// Parse and validate a JSON document.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text).map_err(|e| {
            log::warn!("Config parse failed: {}", e);
            ConfigError::Malformed
        })?;
        config.validate()?;
        Ok(config)
    }
}
