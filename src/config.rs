//! Search configuration.
//!
//! An immutable bag of scoring thresholds supplied once at engine
//! construction and shared read-only by every strategy. All thresholds
//! are on a 0-100 scale.

use crate::error::{ConfigError, ConfigResult};

/// Tunable thresholds for the fuzzy and token strategies.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Minimum score (0-100) for fuzzy matches to be considered valid
    pub fuzzy_minimum_score: u8,

    /// Score threshold (0-100) for high-quality fuzzy matches
    pub fuzzy_high_quality_score: u8,

    /// Minimum score (0-100) for word token matches to be considered valid
    pub token_minimum_score: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            fuzzy_minimum_score: 60,
            fuzzy_high_quality_score: 80,
            token_minimum_score: 70,
        }
    }
}

impl SearchConfig {
    /// Create a validated configuration.
    pub fn new(
        fuzzy_minimum_score: u8,
        fuzzy_high_quality_score: u8,
        token_minimum_score: u8,
    ) -> ConfigResult<Self> {
        let config = Self {
            fuzzy_minimum_score,
            fuzzy_high_quality_score,
            token_minimum_score,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the threshold invariant: minimum <= high-quality <= 100.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.fuzzy_high_quality_score > 100 {
            return Err(ConfigError::InvalidValue {
                field: "fuzzy_high_quality_score",
                reason: format!("must be <= 100, got {}", self.fuzzy_high_quality_score),
            });
        }
        if self.fuzzy_minimum_score > self.fuzzy_high_quality_score {
            return Err(ConfigError::InvalidValue {
                field: "fuzzy_minimum_score",
                reason: format!(
                    "must be <= fuzzy_high_quality_score ({}), got {}",
                    self.fuzzy_high_quality_score, self.fuzzy_minimum_score
                ),
            });
        }
        if self.token_minimum_score > 100 {
            return Err(ConfigError::InvalidValue {
                field: "token_minimum_score",
                reason: format!("must be <= 100, got {}", self.token_minimum_score),
            });
        }
        Ok(())
    }
}
