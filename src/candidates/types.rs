//! Candidate edge and per-node candidate storage.

/// A directed candidate edge from its owning node to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateEdge {
    /// Destination node index.
    pub to: usize,

    /// Cost-of-inclusion weight for alpha-nearness filtering.
    ///
    /// Always 0 here; 2-opt ranks candidates by `length` only.
    pub alpha: i64,

    /// Rounded Euclidean length of the edge.
    pub length: f64,
}

impl CandidateEdge {
    pub fn new(to: usize, length: f64) -> Self {
        Self {
            to,
            alpha: 0,
            length,
        }
    }
}

/// Candidate lists for all nodes of one instance.
///
/// Stored as one flat N×width buffer; every list has exactly `width`
/// entries, `width = min(K, N - 1)`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateSet {
    pub(crate) edges: Vec<CandidateEdge>,
    pub(crate) width: usize,
}

impl CandidateSet {
    /// Candidate set whose lists are all empty, used for single-node instances.
    pub fn empty() -> Self {
        Self {
            edges: Vec::new(),
            width: 0,
        }
    }

    /// Candidate list of node `i`, ascending by `(length, to)`.
    #[inline]
    pub fn list(&self, i: usize) -> &[CandidateEdge] {
        &self.edges[i * self.width..(i + 1) * self.width]
    }

    /// Number of candidates per node.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of nodes covered.
    pub fn node_count(&self) -> usize {
        if self.width == 0 {
            0
        } else {
            self.edges.len() / self.width
        }
    }
}
