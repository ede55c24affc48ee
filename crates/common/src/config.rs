use serde::{Deserialize, Serialize};
use std::path::Path;

/// What happens when an animated move starts while another one for the same
/// entity is still playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Drop the in-flight task, then start the new one.
    #[default]
    CancelAndReplace,
    /// Keep both tasks running. Each writes the position every tick in start
    /// order, so the most recently started task wins the frame.
    Overlap,
}

/// Player controller tuning, loadable from YAML. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Length of one discrete step along an axis.
    pub step: f32,
    /// Seconds an animated move takes to reach its destination.
    pub move_duration: f32,
    pub overlap: OverlapPolicy,
    /// Maximum recorded actions. `None` keeps every action.
    pub history_capacity: Option<usize>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            step: 1.0,
            move_duration: 0.5,
            overlap: OverlapPolicy::default(),
            history_capacity: None,
        }
    }
}

/// Errors from loading or validating a [`ControllerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl ControllerConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "step",
                reason: "must be a positive finite number",
            });
        }
        if !self.move_duration.is_finite() || self.move_duration <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "move_duration",
                reason: "must be a positive finite number",
            });
        }
        if self.history_capacity == Some(0) {
            return Err(ConfigError::Invalid {
                field: "history_capacity",
                reason: "must be at least 1 when set",
            });
        }
        Ok(())
    }
}
