//! JSON-loadable machine settings.

use crate::core::DEFAULT_HISTORY_CAPACITY;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading a [`MachineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The input was not valid JSON for this shape
    #[error("Failed to parse machine config: {0}")]
    Parse(#[from] serde_json::Error),

    /// The input parsed but holds an unusable value
    #[error("Invalid machine config: {0}")]
    Invalid(String),
}

/// Settings for a single state machine.
///
/// ```rust
/// use tickstate::config::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "label": "Robot/Intake" }"#)?;
/// assert_eq!(config.label, "Robot/Intake");
/// assert_eq!(config.history_capacity, 32);
/// assert!(config.telemetry);
/// # Ok::<(), tickstate::config::ConfigError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineConfig {
    /// Telemetry key prefix
    pub label: String,

    /// Number of state changes kept in the history
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Publish state and time-in-state snapshots
    #[serde(default = "default_telemetry")]
    pub telemetry: bool,
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

fn default_telemetry() -> bool {
    true
}

impl MachineConfig {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            telemetry: true,
        }
    }

    /// Parse and validate a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.label.trim().is_empty() {
            return Err(ConfigError::Invalid("label must not be empty".to_string()));
        }
        Ok(())
    }
}
