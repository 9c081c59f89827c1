//! Bounded k-nearest scan.
//!
//! For every node the other N-1 nodes are streamed through a max-heap of
//! capacity `min(K, N - 1)`. The worst kept entry is replaced only by a
//! strictly smaller `(length, index)` key, so equal-length neighbors keep
//! the lowest indices. Cost: O(N² log K).

use super::config::CandidateConfig;
use super::types::{CandidateEdge, CandidateSet};
use crate::error::{Error, Result};
use crate::instance::Instance;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Heap entry ordered by `(length, to)`.
#[derive(Debug, Clone, Copy)]
struct Nearest {
    length: f64,
    to: usize,
}

impl PartialEq for Nearest {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Nearest {}

impl PartialOrd for Nearest {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Nearest {
    fn cmp(&self, other: &Self) -> Ordering {
        self.length
            .total_cmp(&other.length)
            .then(self.to.cmp(&other.to))
    }
}

/// Builds the candidate set of `instance`.
///
/// Every list holds exactly `min(K, N - 1)` edges, strictly ascending by
/// `(length, to)`, never pointing back at its owner.
///
/// # Errors
///
/// - [`Error::InvalidConfig`] if `config.k == 0`
/// - [`Error::InvalidInstance`] if the instance has fewer than 2 nodes
/// - [`Error::Allocation`] if the N×K storage cannot be reserved
///
/// # Examples
///
/// ```
/// use u_tsp::Instance;
/// use u_tsp::candidates::{build_candidates, CandidateConfig};
///
/// let instance = Instance::from_coords(&[(0.0, 0.0), (1.0, 0.0), (5.0, 0.0)]).unwrap();
/// let set = build_candidates(&instance, &CandidateConfig::default()).unwrap();
/// assert_eq!(set.width(), 2);
/// assert_eq!(set.list(0)[0].to, 1);
/// assert_eq!(set.list(2)[0].to, 1);
/// ```
pub fn build_candidates(instance: &Instance, config: &CandidateConfig) -> Result<CandidateSet> {
    config.validate()?;

    let n = instance.len();
    if n < 2 {
        return Err(Error::invalid_instance(format!(
            "candidate sets need at least 2 nodes, got {n}"
        )));
    }

    let width = config.capacity(n);
    let total = n
        .checked_mul(width)
        .ok_or_else(|| Error::allocation(format!("{n}x{width} candidate edges overflow")))?;

    let mut edges = Vec::new();
    edges
        .try_reserve_exact(total)
        .map_err(|e| Error::allocation(format!("{n}x{width} candidate edges: {e}")))?;
    edges.resize(total, CandidateEdge::default());

    #[cfg(feature = "parallel")]
    edges
        .par_chunks_mut(width)
        .enumerate()
        .try_for_each(|(i, list)| fill_nearest(instance, i, list))?;

    #[cfg(not(feature = "parallel"))]
    edges
        .chunks_mut(width)
        .enumerate()
        .try_for_each(|(i, list)| fill_nearest(instance, i, list))?;

    log::debug!("candidates: n={n} k={} width={width}", config.k);

    Ok(CandidateSet { edges, width })
}

/// Writes the `list.len()` nearest neighbors of node `i` into `list`.
fn fill_nearest(instance: &Instance, i: usize, list: &mut [CandidateEdge]) -> Result<()> {
    let width = list.len();

    // Fresh per node: nothing carries over from the previous scan.
    let mut heap: BinaryHeap<Nearest> = BinaryHeap::new();
    heap.try_reserve_exact(width)
        .map_err(|e| Error::allocation(format!("candidate buffer of node {i}: {e}")))?;

    for j in (0..instance.len()).filter(|&j| j != i) {
        let entry = Nearest {
            length: instance.distance(i, j),
            to: j,
        };
        if heap.len() < width {
            heap.push(entry);
        } else if let Some(mut worst) = heap.peek_mut() {
            if entry < *worst {
                *worst = entry;
            }
        }
    }

    for (slot, nearest) in list.iter_mut().zip(heap.into_sorted_vec()) {
        *slot = CandidateEdge::new(nearest.to, nearest.length);
    }
    Ok(())
}
