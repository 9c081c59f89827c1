//! Solve loop for a single instance.

use super::config::SolverConfig;
use crate::candidates::{build_candidates, CandidateSet};
use crate::construction::build_initial_tour;
use crate::error::Result;
use crate::instance::Instance;
use crate::tour::Tour;
use crate::two_opt::{SearchState, TwoOptRunner};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of a full solve.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveResult {
    /// Visiting order (node indices), starting at node 0.
    pub order: Vec<usize>,

    /// Length of the nearest-neighbor tour.
    pub initial_length: f64,

    /// Length after local search.
    pub optimized_length: f64,

    /// Completed 2-opt passes.
    pub passes: usize,

    /// Accepted 2-opt exchanges.
    pub accepted_moves: usize,

    /// Terminal state of the local search.
    pub state: SearchState,

    /// Tour length after each 2-opt pass (first entry: initial length).
    pub length_history: Vec<f64>,

    /// Wall-clock time of the whole solve.
    pub elapsed: Duration,
}

/// Runs the complete pipeline on one instance.
pub struct Solver;

impl Solver {
    /// Solves `instance`.
    ///
    /// # Errors
    ///
    /// Configuration, instance and allocation errors from the components.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::{Instance, Solver, SolverConfig};
    ///
    /// let instance = Instance::from_coords(&[
    ///     (0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0),
    /// ]).unwrap();
    /// let result = Solver::solve(&instance, &SolverConfig::default().with_candidates(3)).unwrap();
    /// assert_eq!(result.initial_length, 40.0);
    /// assert_eq!(result.optimized_length, 40.0);
    /// assert_eq!(result.order, vec![0, 1, 2, 3]);
    /// ```
    pub fn solve(instance: &Instance, config: &SolverConfig) -> Result<SolveResult> {
        Self::solve_with_cancel(instance, config, None)
    }

    /// Solves `instance`, stopping the local search early if `cancel` is raised.
    pub fn solve_with_cancel(
        instance: &Instance,
        config: &SolverConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SolveResult> {
        config.validate()?;
        let start = Instant::now();
        let n = instance.len();

        let candidates = if n < 2 {
            CandidateSet::empty()
        } else {
            build_candidates(instance, &config.candidates)?
        };
        log::debug!(
            "candidate lists built: width={} in {:?}",
            candidates.width(),
            start.elapsed()
        );

        let initial = build_initial_tour(instance)?;
        log::info!("initial tour: n={n} length={:.0}", initial.length);

        let mut tour = Tour::from_order(&initial.order);
        let search =
            TwoOptRunner::run_with_cancel(instance, &candidates, &mut tour, &config.two_opt, cancel)?;

        Ok(SolveResult {
            order: tour.order(),
            initial_length: initial.length,
            optimized_length: search.final_length,
            passes: search.passes,
            accepted_moves: search.accepted_moves,
            state: search.state,
            length_history: search.length_history,
            elapsed: start.elapsed(),
        })
    }
}
