//! Scoring configuration module.

use super::{ConfigResult, Validate};
use crate::error::config::{ConfigError, ConfigSection};
use serde::{Deserialize, Serialize};

/// Largest supported rounding precision.
pub const MAX_PRECISION: u32 = 10;

/// Scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Upper bound of the reported score
    pub max_score: f64,

    /// Number of decimal places totals are rounded to
    pub precision: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_score: 1.0,
            precision: 3,
        }
    }
}

impl Validate for ScoringConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !self.max_score.is_finite() || self.max_score <= 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                section: ConfigSection::Scoring,
                field: "max_score",
                message: "must be a finite number > 0.0".to_string(),
            });
        }

        if self.precision > MAX_PRECISION {
            return Err(ConfigError::ValueOutOfRange {
                section: ConfigSection::Scoring,
                field: "precision",
                message: format!("must be at most {MAX_PRECISION}"),
            });
        }

        Ok(())
    }
}
