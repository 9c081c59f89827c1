//! 2-opt execution loop.
//!
//! # Algorithm
//!
//! 1. State = Scanning
//! 2. Before each pass: stop as Interrupted if cancelled, out of time or
//!    out of passes
//! 3. Run one pass (see [`TwoOptRunner::pass`])
//! 4. If the pass applied no move, state = Converged
//!
//! Every accepted move shortens the tour by more than `epsilon`, so the loop
//! terminates, but the number of passes has no a-priori bound.

use super::config::TwoOptConfig;
use super::types::{PassOutcome, SearchState, StopReason, TwoOptResult};
use crate::candidates::CandidateSet;
use crate::error::{Error, Result};
use crate::instance::Instance;
use crate::tour::Tour;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Executes candidate-guided 2-opt on a [`Tour`].
pub struct TwoOptRunner;

impl TwoOptRunner {
    /// Improves `tour` in place until no candidate move improves it.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::{Instance, Tour};
    /// use u_tsp::candidates::{build_candidates, CandidateConfig};
    /// use u_tsp::two_opt::{TwoOptConfig, TwoOptRunner};
    ///
    /// // (0,0) -> (10,10) -> (0,10) -> (10,0) crosses itself.
    /// let instance = Instance::from_coords(&[
    ///     (0.0, 0.0), (10.0, 10.0), (0.0, 10.0), (10.0, 0.0),
    /// ]).unwrap();
    /// let candidates = build_candidates(&instance, &CandidateConfig::default()).unwrap();
    /// let mut tour = Tour::from_order(&[0, 1, 2, 3]);
    ///
    /// let result = TwoOptRunner::run(&instance, &candidates, &mut tour, &TwoOptConfig::default()).unwrap();
    /// assert_eq!(result.initial_length, 48.0);
    /// assert_eq!(result.final_length, 40.0);
    /// assert!(result.state.is_converged());
    /// ```
    pub fn run(
        instance: &Instance,
        candidates: &CandidateSet,
        tour: &mut Tour,
        config: &TwoOptConfig,
    ) -> Result<TwoOptResult> {
        Self::run_with_cancel(instance, candidates, tour, config, None)
    }

    /// Runs 2-opt with an optional cancellation flag, checked between passes.
    ///
    /// On interruption the tour is left as the last completed pass made it:
    /// a valid cycle, possibly not 2-optimal.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInstance`] if the tour or the candidate lists do not
    /// cover exactly the nodes of `instance`; only a single-node instance may
    /// use [`CandidateSet::empty`].
    pub fn run_with_cancel(
        instance: &Instance,
        candidates: &CandidateSet,
        tour: &mut Tour,
        config: &TwoOptConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<TwoOptResult> {
        config.validate()?;

        let n = instance.len();
        if tour.len() != n {
            return Err(Error::invalid_instance(format!(
                "tour has {} nodes, instance has {n}",
                tour.len()
            )));
        }
        // Only a single-node tour may run without candidate lists.
        if n >= 2 && (candidates.width() == 0 || candidates.node_count() != n) {
            return Err(Error::invalid_instance(format!(
                "candidate set covers {} nodes with width {}, instance has {n}",
                candidates.node_count(),
                candidates.width()
            )));
        }

        let start = Instant::now();
        let initial_length = tour.total_length(instance);
        let mut length = initial_length;
        let mut length_history = vec![initial_length];
        let mut passes = 0usize;
        let mut accepted_moves = 0usize;

        // No two non-adjacent edges exist below 4 nodes.
        let mut state = if n < 4 {
            SearchState::Converged
        } else {
            SearchState::Scanning
        };

        while state == SearchState::Scanning {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    state = SearchState::Interrupted(StopReason::Cancelled);
                    break;
                }
            }
            if config
                .time_limit
                .is_some_and(|limit| start.elapsed() >= limit)
            {
                state = SearchState::Interrupted(StopReason::TimeLimit);
                break;
            }
            if config.max_passes > 0 && passes >= config.max_passes {
                state = SearchState::Interrupted(StopReason::PassLimit);
                break;
            }

            let outcome = Self::pass(instance, candidates, tour, config.epsilon);
            passes += 1;
            accepted_moves += outcome.moves;
            length -= outcome.gain;
            length_history.push(length);

            debug_assert_eq!(tour.validate(), Ok(()));
            log::debug!(
                "2-opt pass {passes}: moves={} gain={:.0} length={length:.0}",
                outcome.moves,
                outcome.gain
            );

            if outcome.moves == 0 {
                state = SearchState::Converged;
            }
        }

        let final_length = tour.total_length(instance);
        let elapsed = start.elapsed();

        match state {
            SearchState::Interrupted(reason) => log::warn!(
                "2-opt interrupted ({reason:?}) after {passes} passes: length={final_length:.0}"
            ),
            _ => log::info!(
                "2-opt converged after {passes} passes, {accepted_moves} moves: {initial_length:.0} -> {final_length:.0} in {elapsed:?}"
            ),
        }

        Ok(TwoOptResult {
            initial_length,
            final_length,
            passes,
            accepted_moves,
            state,
            length_history,
            elapsed,
        })
    }

    /// Runs one first-improvement pass over all nodes.
    ///
    /// For each node `a` (index order) with `b = succ(a)`, the candidates
    /// `c` of `a` are tried with `d = succ(c)`; `c == a`, `c == b` and
    /// `d == a` are skipped. The first exchange whose gain
    /// `d(a,b) + d(c,d) - d(a,c) - d(b,d)` exceeds `epsilon` is applied and
    /// the scan continues with node `a + 1`.
    pub fn pass(
        instance: &Instance,
        candidates: &CandidateSet,
        tour: &mut Tour,
        epsilon: f64,
    ) -> PassOutcome {
        let mut outcome = PassOutcome::default();

        for a in 0..instance.len() {
            let b = tour.successor(a);
            let ab = instance.distance(a, b);

            for edge in candidates.list(a) {
                let c = edge.to;
                let d = tour.successor(c);
                if c == a || c == b || d == a {
                    continue;
                }

                let delta = ab + instance.distance(c, d) - edge.length - instance.distance(b, d);
                if delta > epsilon {
                    tour.reverse_segment(b, c);
                    outcome.moves += 1;
                    outcome.gain += delta;
                    // succ(a) changed; move on to the next node.
                    break;
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::{build_candidates, CandidateConfig};
    use crate::construction::build_initial_tour;
    use std::time::Duration;

    fn setup(instance: &Instance, k: usize) -> (CandidateSet, Tour) {
        let candidates =
            build_candidates(instance, &CandidateConfig::default().with_k(k)).unwrap();
        let initial = build_initial_tour(instance).unwrap();
        (candidates, Tour::from_order(&initial.order))
    }

    #[test]
    fn test_square_already_optimal() {
        let instance =
            Instance::from_coords(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]).unwrap();
        let (candidates, mut tour) = setup(&instance, 3);

        let result =
            TwoOptRunner::run(&instance, &candidates, &mut tour, &TwoOptConfig::default()).unwrap();

        assert_eq!(result.initial_length, 40.0);
        assert_eq!(result.final_length, 40.0);
        assert_eq!(result.accepted_moves, 0);
        assert_eq!(result.passes, 1);
        assert_eq!(result.state, SearchState::Converged);
    }

    #[test]
    fn test_crossing_square_uncrossed() {
        let instance =
            Instance::from_coords(&[(0.0, 0.0), (10.0, 10.0), (0.0, 10.0), (10.0, 0.0)]).unwrap();
        let candidates = build_candidates(&instance, &CandidateConfig::default()).unwrap();
        let mut tour = Tour::from_order(&[0, 1, 2, 3]);

        let result =
            TwoOptRunner::run(&instance, &candidates, &mut tour, &TwoOptConfig::default()).unwrap();

        assert_eq!(result.initial_length, 48.0);
        assert_eq!(result.final_length, 40.0);
        assert_eq!(result.accepted_moves, 1);
        assert_eq!(tour.total_length(&instance), 40.0);
        assert!(tour.validate().is_ok());
    }

    #[test]
    fn test_empty_candidates_rejected_for_real_tour() {
        let instance =
            Instance::from_coords(&[(0.0, 0.0), (10.0, 10.0), (0.0, 10.0), (10.0, 0.0)]).unwrap();
        let mut tour = Tour::from_order(&[0, 1, 2, 3]);

        let err = TwoOptRunner::run(
            &instance,
            &CandidateSet::empty(),
            &mut tour,
            &TwoOptConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(err, Error::InvalidInstance(_)));
        assert_eq!(tour.order(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_candidates_for_other_instance_rejected() {
        let small = Instance::from_coords(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]).unwrap();
        let candidates = build_candidates(&small, &CandidateConfig::default()).unwrap();
        let instance =
            Instance::from_coords(&[(0.0, 0.0), (10.0, 10.0), (0.0, 10.0), (10.0, 0.0)]).unwrap();
        let mut tour = Tour::from_order(&[0, 1, 2, 3]);

        let err = TwoOptRunner::run(&instance, &candidates, &mut tour, &TwoOptConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInstance(_)));
    }

    #[test]
    fn test_small_tours_skip_search() {
        for coords in [
            vec![(0.0, 0.0)],
            vec![(0.0, 0.0), (3.0, 4.0)],
            vec![(0.0, 0.0), (3.0, 4.0), (8.0, 1.0)],
        ] {
            let instance = Instance::from_coords(&coords).unwrap();
            let candidates = if instance.len() < 2 {
                CandidateSet::empty()
            } else {
                build_candidates(&instance, &CandidateConfig::default()).unwrap()
            };
            let initial = build_initial_tour(&instance).unwrap();
            let mut tour = Tour::from_order(&initial.order);

            let result =
                TwoOptRunner::run(&instance, &candidates, &mut tour, &TwoOptConfig::default())
                    .unwrap();
            assert_eq!(result.passes, 0);
            assert_eq!(result.accepted_moves, 0);
            assert_eq!(result.final_length, initial.length);
            assert!(result.state.is_converged());
        }
    }

    #[test]
    fn test_pass_on_two_nodes_finds_nothing() {
        let instance = Instance::from_coords(&[(0.0, 0.0), (3.0, 4.0)]).unwrap();
        let (candidates, mut tour) = setup(&instance, 20);
        let outcome = TwoOptRunner::pass(&instance, &candidates, &mut tour, 1e-9);
        assert_eq!(outcome.moves, 0);
        assert_eq!(tour.total_length(&instance), 10.0);
    }

    #[test]
    fn test_random_instance_improves_and_converges() {
        let instance = Instance::random_uniform(300, 10_000.0, 42).unwrap();
        let (candidates, mut tour) = setup(&instance, 10);
        let config = TwoOptConfig::default();

        let result = TwoOptRunner::run(&instance, &candidates, &mut tour, &config).unwrap();

        assert!(result.state.is_converged());
        assert!(result.accepted_moves > 0);
        assert!(result.final_length < result.initial_length);
        assert_eq!(result.final_length, tour.total_length(&instance));
        assert_eq!(result.length_history.len(), result.passes + 1);
        assert_eq!(*result.length_history.last().unwrap(), result.final_length);

        // Converged means another pass finds nothing.
        let again = TwoOptRunner::pass(&instance, &candidates, &mut tour, config.epsilon);
        assert_eq!(again.moves, 0);
    }

    #[test]
    fn test_length_history_strictly_decreasing_until_last() {
        let instance = Instance::random_uniform(200, 1_000.0, 3).unwrap();
        let (candidates, mut tour) = setup(&instance, 8);

        let result =
            TwoOptRunner::run(&instance, &candidates, &mut tour, &TwoOptConfig::default()).unwrap();

        let history = &result.length_history;
        for window in history[..history.len() - 1].windows(2) {
            assert!(
                window[1] < window[0],
                "improving pass must shorten the tour: {} -> {}",
                window[0],
                window[1]
            );
        }
        // The converging pass changes nothing.
        assert_eq!(history[history.len() - 1], history[history.len() - 2]);
    }

    #[test]
    fn test_pass_limit() {
        let instance = Instance::random_uniform(200, 1_000.0, 11).unwrap();
        let (candidates, mut tour) = setup(&instance, 8);
        let config = TwoOptConfig::default().with_max_passes(1);

        let result = TwoOptRunner::run(&instance, &candidates, &mut tour, &config).unwrap();

        assert_eq!(result.passes, 1);
        if result.accepted_moves > 0 {
            assert_eq!(
                result.state,
                SearchState::Interrupted(StopReason::PassLimit)
            );
        }
        assert!(tour.validate().is_ok());
    }

    #[test]
    fn test_zero_time_limit_keeps_initial_tour() {
        let instance = Instance::random_uniform(100, 1_000.0, 5).unwrap();
        let (candidates, mut tour) = setup(&instance, 8);
        let before = tour.clone();
        let config = TwoOptConfig::default().with_time_limit(Duration::ZERO);

        let result = TwoOptRunner::run(&instance, &candidates, &mut tour, &config).unwrap();

        assert_eq!(result.state, SearchState::Interrupted(StopReason::TimeLimit));
        assert_eq!(result.passes, 0);
        assert_eq!(result.final_length, result.initial_length);
        assert_eq!(tour, before);
    }

    #[test]
    fn test_cancellation() {
        let instance = Instance::random_uniform(100, 1_000.0, 9).unwrap();
        let (candidates, mut tour) = setup(&instance, 8);

        // Raised before the run so the outcome does not depend on timing.
        let cancel = Arc::new(AtomicBool::new(true));
        let result = TwoOptRunner::run_with_cancel(
            &instance,
            &candidates,
            &mut tour,
            &TwoOptConfig::default(),
            Some(cancel),
        )
        .unwrap();

        assert_eq!(result.state, SearchState::Interrupted(StopReason::Cancelled));
        assert_eq!(result.passes, 0);
    }

    #[test]
    fn test_mismatched_tour_rejected() {
        let instance =
            Instance::from_coords(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]).unwrap();
        let (candidates, _) = setup(&instance, 3);
        let mut tour = Tour::from_order(&[0, 1, 2]);
        let err = TwoOptRunner::run(&instance, &candidates, &mut tour, &TwoOptConfig::default())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInstance(_)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let instance =
            Instance::from_coords(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]).unwrap();
        let (candidates, mut tour) = setup(&instance, 3);
        let config = TwoOptConfig::default().with_epsilon(0.0);
        let err = TwoOptRunner::run(&instance, &candidates, &mut tour, &config).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
