//! Candidate set configuration.

use crate::error::{Error, Result};

/// Default number of candidates kept per node.
pub const DEFAULT_CANDIDATES: usize = 20;

/// Configuration for candidate set construction.
///
/// # Examples
///
/// ```
/// use u_tsp::candidates::CandidateConfig;
///
/// let config = CandidateConfig::default().with_k(8);
/// assert_eq!(config.k, 8);
/// assert_eq!(config.capacity(5), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateConfig {
    /// Maximum candidates per node (K). Clamped to `N - 1` for small instances.
    pub k: usize,
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_CANDIDATES,
        }
    }
}

impl CandidateConfig {
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Effective list length for an instance of `n` nodes: `min(K, N - 1)`.
    pub fn capacity(&self, n: usize) -> usize {
        self.k.min(n.saturating_sub(1))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::invalid_config("candidate count k must be at least 1"));
        }
        Ok(())
    }
}
