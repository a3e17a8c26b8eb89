//! Automaton cache configuration module.

use super::{ConfigResult, Validate};
use crate::error::config::{ConfigError, ConfigSection};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Automaton cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomatonConfig {
    /// Where the constructed automaton is stored between runs (None disables caching)
    pub cache_path: Option<PathBuf>,

    /// Rebuild from the keyword catalog even if a cached automaton exists
    pub rebuild: bool,
}

impl Default for AutomatonConfig {
    fn default() -> Self {
        Self {
            cache_path: Some(PathBuf::from("config/ac_automaton.json")),
            rebuild: false,
        }
    }
}

impl Validate for AutomatonConfig {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(path) = &self.cache_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue {
                    section: ConfigSection::Automaton,
                    field: "cache_path",
                    message: "cannot be empty when set".to_string(),
                });
            }
        }

        Ok(())
    }
}
