//! 2-opt configuration.

use crate::error::{Error, Result};
use std::time::Duration;

/// Configuration for the 2-opt local search.
///
/// By default the search runs until convergence with no pass or time cap.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tsp::two_opt::TwoOptConfig;
///
/// let config = TwoOptConfig::default()
///     .with_time_limit(Duration::from_secs(5))
///     .with_max_passes(100);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoOptConfig {
    /// Minimum gain for a move to count as improving.
    ///
    /// Lengths are integral, so any value in (0, 1) behaves the same; it
    /// only guards against float noise.
    pub epsilon: f64,

    /// Maximum number of passes. 0 = no limit.
    pub max_passes: usize,

    /// Wall-clock budget, checked between passes.
    pub time_limit: Option<Duration>,
}

impl Default for TwoOptConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-9,
            max_passes: 0,
            time_limit: None,
        }
    }
}

impl TwoOptConfig {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_max_passes(mut self, n: usize) -> Self {
        self.max_passes = n;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(Error::invalid_config(format!(
                "epsilon must be positive and finite, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}
