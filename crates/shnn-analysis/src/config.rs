//! Configuration for analysis data structures
//!
//! Loaded from TOML, e.g.
//!
//! ```toml
//! wildcard = "x"
//!
//! [periods]
//! orientation = 3.141592653589793
//! phase = 6.283185307179586
//! ```

use crate::error::{AnalysisError, Result};
use crate::tuning::DEFAULT_WILDCARD;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Analysis layer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Marker used by [`ParametrizationKey::render_with`](crate::ParametrizationKey::render_with)
    /// in place of the varying parameter
    pub wildcard: String,

    /// Period of each cyclic stimulus parameter, by parameter name
    pub periods: BTreeMap<String, f64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let mut periods = BTreeMap::new();
        periods.insert("orientation".to_string(), std::f64::consts::PI);
        Self {
            wildcard: DEFAULT_WILDCARD.to_string(),
            periods,
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| AnalysisError::config(format!("Invalid config file: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file, falling back to defaults if it is missing
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| AnalysisError::config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check the configuration for invalid values
    pub fn validate(&self) -> Result<()> {
        if self.wildcard.is_empty() {
            return Err(AnalysisError::config("wildcard must not be empty"));
        }
        for (name, &period) in &self.periods {
            if !period.is_finite() || period <= 0.0 {
                return Err(AnalysisError::config(format!(
                    "period of {:?} must be finite and > 0, got {}",
                    name, period
                )));
            }
        }
        Ok(())
    }

    /// Configured period of a cyclic parameter
    pub fn period_for(&self, parameter: &str) -> Option<f64> {
        self.periods.get(parameter).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.wildcard, "x");
        assert_eq!(config.period_for("orientation"), Some(std::f64::consts::PI));
        assert_eq!(config.period_for("contrast"), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_str() {
        let config = AnalysisConfig::from_toml_str(
            r#"
            wildcard = "*"

            [periods]
            phase = 6.5
            "#,
        )
        .unwrap();
        assert_eq!(config.wildcard, "*");
        assert_eq!(config.period_for("phase"), Some(6.5));
        assert_eq!(config.period_for("orientation"), None);

        // Missing fields fall back to defaults
        let config = AnalysisConfig::from_toml_str("").unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        assert!(AnalysisConfig::from_toml_str("wildcard = \"\"").is_err());
        assert!(AnalysisConfig::from_toml_str("[periods]\norientation = -1.0").is_err());
        assert!(AnalysisConfig::from_toml_str("wildcard = 3").is_err());
    }

    #[test]
    fn test_wildcard_renders_keys() {
        use crate::{ParametrizationKey, StimulusRecord};

        let record = StimulusRecord::new("G")
            .with_parameter("c", "50")
            .with_parameter("o", "0");
        let (key, _) = ParametrizationKey::split(record, 1).unwrap();

        let config = AnalysisConfig::from_toml_str("wildcard = \"*\"").unwrap();
        assert_eq!(key.render_with(&config), "G(c=50, o=*)");
        assert_eq!(key.render_with(&AnalysisConfig::default()), "G(c=50, o=x)");
    }

    #[test]
    fn test_file_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("analysis").join("config.toml");

        let missing = AnalysisConfig::load_from_file(&path).unwrap();
        assert_eq!(missing, AnalysisConfig::default());

        let mut config = AnalysisConfig::default();
        config.periods.insert("phase".to_string(), 2.0 * std::f64::consts::PI);
        config.save_to_file(&path).unwrap();

        let loaded = AnalysisConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}
