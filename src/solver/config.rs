//! Solver configuration.

use crate::candidates::CandidateConfig;
use crate::error::Result;
use crate::two_opt::TwoOptConfig;
use std::time::Duration;

/// Configuration for a full solve.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tsp::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_candidates(10)
///     .with_time_limit(Duration::from_millis(500));
/// assert_eq!(config.candidates.k, 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    pub candidates: CandidateConfig,
    pub two_opt: TwoOptConfig,
}

impl SolverConfig {
    /// Sets the candidate list capacity K.
    pub fn with_candidates(mut self, k: usize) -> Self {
        self.candidates.k = k;
        self
    }

    /// Sets the wall-clock budget of the local search.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.two_opt.time_limit = Some(limit);
        self
    }

    pub fn with_max_passes(mut self, n: usize) -> Self {
        self.two_opt.max_passes = n;
        self
    }

    /// Validates both component configurations.
    pub fn validate(&self) -> Result<()> {
        self.candidates.validate()?;
        self.two_opt.validate()
    }
}
