//! Score aggregation over keyword matches.
//!
//! Every emitted match contributes its weight once, so a keyword that occurs
//! three times counts three times. The total is rounded to a fixed number of
//! decimal places and the reported score is clamped to `max_score`.

use crate::config::scoring::ScoringConfig;

/// Sums match weights into a bounded score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreAggregator {
    max_score: f64,
    precision: u32,
}

impl ScoreAggregator {
    /// Creates an aggregator.
    ///
    /// # Arguments
    ///
    /// * `max_score` - Upper bound of [`ScoreAggregator::score`].
    /// * `precision` - Decimal places totals are rounded to.
    pub fn new(max_score: f64, precision: u32) -> Self {
        Self {
            max_score,
            precision,
        }
    }

    /// Creates an aggregator from validated configuration.
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(config.max_score, config.precision)
    }

    /// Rounded sum of all weights.
    pub fn total<I>(&self, weights: I) -> f64
    where
        I: IntoIterator<Item = f64>,
    {
        self.round(weights.into_iter().sum())
    }

    /// Rounded sum of all weights, clamped to `max_score`.
    pub fn score<I>(&self, weights: I) -> f64
    where
        I: IntoIterator<Item = f64>,
    {
        self.clamp(self.total(weights))
    }

    /// Clamps an already rounded total to `max_score`.
    pub fn clamp(&self, total: f64) -> f64 {
        total.min(self.max_score)
    }

    fn round(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.precision as i32);
        (value * factor).round() / factor
    }
}

impl Default for ScoreAggregator {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}
