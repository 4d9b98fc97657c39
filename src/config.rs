// Configuration for state-history metrics
//
// State ids and the window length are data, not literals.
// Defaults reproduce the reference fleet data set.

use crate::history::StateId;
use crate::timeline::DEFAULT_WINDOW_HOURS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// State id of "Operando" in the reference data set
pub const DEFAULT_OPERATING_STATE_ID: &str = "0808344c-454b-4c36-89e8-d7687e692d57";

/// State id of "Manutenção" in the reference data set
pub const DEFAULT_MAINTENANCE_STATE_ID: &str = "03b2d446-e3ba-4c82-8dc2-a5611fea6e1f";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("window_hours must be a positive finite number, got {0}")]
    InvalidWindow(f64),

    #[error("{0} must not be empty")]
    EmptyStateId(&'static str),

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Parameters of the aggregation pipeline
///
/// # Example TOML
/// ```toml
/// window_hours = 12.0
/// operating_state_id = "operating"
/// maintenance_state_id = "maintenance"
/// ```
///
/// Any key left out keeps its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Length of the trailing window, in hours (default: 24)
    pub window_hours: f64,

    /// State counted by `operating_hours` and productivity
    pub operating_state_id: StateId,

    /// State counted by `maintenance_hours`
    pub maintenance_state_id: StateId,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            window_hours: DEFAULT_WINDOW_HOURS,
            operating_state_id: StateId::from(DEFAULT_OPERATING_STATE_ID),
            maintenance_state_id: StateId::from(DEFAULT_MAINTENANCE_STATE_ID),
        }
    }
}

impl MetricsConfig {
    /// Parse from TOML text; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Same parameters with a different window length
    pub fn with_window_hours(mut self, hours: f64) -> Self {
        self.window_hours = hours;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.window_hours.is_finite() || self.window_hours <= 0.0 {
            return Err(ConfigError::InvalidWindow(self.window_hours));
        }

        if self.operating_state_id.is_empty() {
            return Err(ConfigError::EmptyStateId("operating_state_id"));
        }

        if self.maintenance_state_id.is_empty() {
            return Err(ConfigError::EmptyStateId("maintenance_state_id"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MetricsConfig::default();
        assert_eq!(config.window_hours, 24.0);
        assert_eq!(config.operating_state_id.as_str(), DEFAULT_OPERATING_STATE_ID);
        assert_eq!(config.maintenance_state_id.as_str(), DEFAULT_MAINTENANCE_STATE_ID);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = MetricsConfig::from_toml_str("window_hours = 12.0").unwrap();
        assert_eq!(config.window_hours, 12.0);
        assert_eq!(config.operating_state_id.as_str(), DEFAULT_OPERATING_STATE_ID);
    }

    #[test]
    fn test_full_toml() {
        let toml = r#"
            window_hours = 8.0
            operating_state_id = "operating"
            maintenance_state_id = "maintenance"
        "#;
        let config = MetricsConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.window_hours, 8.0);
        assert_eq!(config.operating_state_id.as_str(), "operating");
        assert_eq!(config.maintenance_state_id.as_str(), "maintenance");
    }

    #[test]
    fn test_invalid_toml_syntax() {
        assert!(matches!(
            MetricsConfig::from_toml_str("window_hours = "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_window() {
        let mut config = MetricsConfig::default();
        config.window_hours = 0.0;
        assert!(config.validate().is_err());
        config.window_hours = f64::NAN;
        assert!(config.validate().is_err());
        config.window_hours = -4.0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidWindow(_))));
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_empty_state_id() {
        let mut config = MetricsConfig::default();
        config.maintenance_state_id = StateId::from(" ");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyStateId("maintenance_state_id"))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = MetricsConfig::from_toml("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("not/here.toml"));
    }
}
