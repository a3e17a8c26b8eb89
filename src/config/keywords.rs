//! Keyword catalog configuration module.
//!
//! Locations of the keyword groups and group weights files, and the weight
//! given to groups the weights file does not mention.

use super::{ConfigResult, Validate};
use crate::error::config::{ConfigError, ConfigSection};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Keyword catalog configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordsConfig {
    /// YAML file mapping group names to lists of phrases
    pub keywords_path: PathBuf,

    /// JSON file mapping group names to weights
    pub weights_path: PathBuf,

    /// Weight for phrases whose group has no entry in the weights file
    pub default_weight: f64,
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        Self {
            keywords_path: PathBuf::from("config/scam_keywords.yml"),
            weights_path: PathBuf::from("config/scam_keywords_weights.json"),
            default_weight: 0.1,
        }
    }
}

impl Validate for KeywordsConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.keywords_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                section: ConfigSection::Keywords,
                field: "keywords_path",
                message: "cannot be empty".to_string(),
            });
        }

        if self.weights_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                section: ConfigSection::Keywords,
                field: "weights_path",
                message: "cannot be empty".to_string(),
            });
        }

        if !self.default_weight.is_finite() || self.default_weight < 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                section: ConfigSection::Keywords,
                field: "default_weight",
                message: "must be a finite number >= 0.0".to_string(),
            });
        }

        Ok(())
    }
}
