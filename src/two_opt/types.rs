//! Search states and results.

use std::time::Duration;

/// Why a search stopped before converging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// The wall-clock budget ran out.
    TimeLimit,
    /// `max_passes` passes were run.
    PassLimit,
    /// The cancellation flag was raised.
    Cancelled,
}

/// State of the local search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    /// Looking for improving moves.
    Scanning,
    /// A full pass found no improving move. Terminal.
    Converged,
    /// Stopped early; the tour is valid but may not be 2-optimal. Terminal.
    Interrupted(StopReason),
}

impl SearchState {
    pub fn is_converged(&self) -> bool {
        matches!(self, SearchState::Converged)
    }
}

/// Moves applied by a single pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PassOutcome {
    /// Number of accepted exchanges.
    pub moves: usize,
    /// Sum of the length reductions of those exchanges.
    pub gain: f64,
}

/// Result of a 2-opt run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoOptResult {
    /// Tour length before the first pass.
    pub initial_length: f64,

    /// Tour length when the search stopped.
    pub final_length: f64,

    /// Number of completed passes.
    pub passes: usize,

    /// Total accepted exchanges over all passes.
    pub accepted_moves: usize,

    /// Terminal state.
    pub state: SearchState,

    /// Tour length after each pass (first entry: initial length).
    pub length_history: Vec<f64>,

    /// Time spent in the search.
    pub elapsed: Duration,
}
