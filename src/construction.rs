//! Nearest-neighbor tour construction.
//!
//! Starts at node 0 and repeatedly walks to the closest unvisited node.
//! The scan covers every node rather than the candidate list: late in the
//! construction a node's candidates are usually all visited already.
//!
//! # Complexity
//!
//! O(N²) distance evaluations.

use crate::error::{Error, Result};
use crate::instance::Instance;

/// A complete visiting order and its closed-tour length.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitialTour {
    /// Permutation of `0..N` starting with node 0.
    pub order: Vec<usize>,
    /// Total length including the closing edge back to node 0.
    pub length: f64,
}

/// Builds the greedy nearest-neighbor tour of `instance`.
///
/// Equal-distance choices go to the lowest node index, so the result is
/// fully deterministic.
///
/// # Examples
///
/// ```
/// use u_tsp::Instance;
/// use u_tsp::construction::build_initial_tour;
///
/// let instance = Instance::from_coords(&[
///     (0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0),
/// ]).unwrap();
/// let tour = build_initial_tour(&instance).unwrap();
/// assert_eq!(tour.order, vec![0, 1, 2, 3]);
/// assert_eq!(tour.length, 40.0);
/// ```
pub fn build_initial_tour(instance: &Instance) -> Result<InitialTour> {
    let n = instance.len();
    if n == 0 {
        return Err(Error::invalid_instance("cannot build a tour over zero nodes"));
    }

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut length = 0.0;

    let mut current = 0;
    visited[current] = true;
    order.push(current);

    for _ in 1..n {
        let mut best: Option<(usize, f64)> = None;
        for (j, _) in visited.iter().enumerate().filter(|&(_, &seen)| !seen) {
            let d = instance.distance(current, j);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((j, d));
            }
        }

        // n - order.len() > 0 unvisited nodes remain inside this loop.
        let Some((next, d)) = best else {
            unreachable!("unvisited node must exist while order is incomplete");
        };
        visited[next] = true;
        order.push(next);
        length += d;
        current = next;
    }

    length += instance.distance(current, order[0]);

    Ok(InitialTour { order, length })
}
