//! Doubly linked cyclic tour over node indices.
//!
//! Adjacency is kept in parallel `next`/`prev` arrays indexed by node, plus
//! a `pos` array giving each node's rank along `next` starting from an
//! arbitrary origin. Ranks make the length of any arc O(1), which lets
//! [`Tour::reverse_segment`] always flip the shorter side of a 2-opt move.
//!
//! # Invariant
//!
//! `next[prev[i]] == i`, `prev[next[i]] == i`, and following `next` from any
//! node visits all N nodes before returning. Operations that would break it
//! panic.

use crate::instance::Instance;

/// A Hamiltonian cycle over `0..N`.
///
/// # Examples
///
/// ```
/// use u_tsp::Tour;
///
/// let mut tour = Tour::from_order(&[0, 1, 2, 3, 4, 5]);
/// assert_eq!(tour.successor(5), 0);
///
/// // 0 -> 1 -> 2 -> 3 -> 4 -> 5  becomes  0 -> 3 -> 2 -> 1 -> 4 -> 5
/// tour.reverse_segment(1, 3);
/// assert_eq!(tour.order(), vec![0, 3, 2, 1, 4, 5]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    next: Vec<usize>,
    prev: Vec<usize>,
    pos: Vec<usize>,
}

impl Tour {
    /// Builds a tour visiting `order` cyclically.
    ///
    /// # Panics
    ///
    /// If `order` is not a permutation of `0..order.len()`.
    pub fn from_order(order: &[usize]) -> Self {
        let mut tour = Self {
            next: Vec::new(),
            prev: Vec::new(),
            pos: Vec::new(),
        };
        tour.initialize(order);
        tour
    }

    /// Resets adjacency so that `order` forms the cycle, wrapping from the
    /// last node back to the first.
    ///
    /// # Panics
    ///
    /// If `order` is not a permutation of `0..order.len()`.
    pub fn initialize(&mut self, order: &[usize]) {
        let n = order.len();
        assert!(n > 0, "tour needs at least one node");

        let mut seen = vec![false; n];
        for &node in order {
            assert!(node < n, "node {node} out of range for a tour of {n}");
            assert!(!seen[node], "node {node} appears twice in tour order");
            seen[node] = true;
        }

        self.next = vec![0; n];
        self.prev = vec![0; n];
        self.pos = vec![0; n];
        for (rank, &node) in order.iter().enumerate() {
            let succ = order[(rank + 1) % n];
            self.next[node] = succ;
            self.prev[succ] = node;
            self.pos[node] = rank;
        }
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.next.len()
    }

    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }

    #[inline]
    pub fn successor(&self, i: usize) -> usize {
        self.next[i]
    }

    #[inline]
    pub fn predecessor(&self, i: usize) -> usize {
        self.prev[i]
    }

    /// Number of nodes on the path from `from` to `to` following successors,
    /// both ends included.
    #[inline]
    fn arc_len(&self, from: usize, to: usize) -> usize {
        let n = self.len();
        (self.pos[to] + n - self.pos[from]) % n + 1
    }

    /// Applies the 2-opt exchange that replaces edges `(a, b)` and `(c, d)`
    /// with `(a, c)` and `(b, d)`, where `a = predecessor(b)` and
    /// `d = successor(c)`.
    ///
    /// Either the path `b..c` or its complement `d..a` is reversed,
    /// whichever is shorter; both give the same undirected cycle. Cost is
    /// O(min(len, N - len)).
    ///
    /// # Panics
    ///
    /// If `b..c` covers the whole tour (there is no `a`/`d` to reconnect).
    pub fn reverse_segment(&mut self, b: usize, c: usize) {
        let n = self.len();
        let len = self.arc_len(b, c);
        assert!(
            len < n,
            "reverse_segment({b}, {c}) spans the whole tour of {n} nodes"
        );

        if 2 * len <= n {
            self.reverse_path(b, c, len);
        } else {
            let a = self.prev[b];
            let d = self.next[c];
            self.reverse_path(d, a, n - len);
        }
    }

    /// Reverses the `len`-node path `from..to` in place:
    /// `p -> from .. to -> s` becomes `p -> to .. from -> s`.
    fn reverse_path(&mut self, from: usize, to: usize, len: usize) {
        let n = self.len();
        let p = self.prev[from];
        let s = self.next[to];
        let start = self.pos[from];

        let mut node = from;
        for k in 0..len {
            let succ = self.next[node];
            std::mem::swap(&mut self.next[node], &mut self.prev[node]);
            self.pos[node] = (start + len - 1 - k) % n;
            node = succ;
        }
        assert_eq!(node, s, "path {from}..{to} is not {len} nodes long");

        self.next[p] = to;
        self.prev[to] = p;
        self.next[from] = s;
        self.prev[s] = from;
    }

    /// Visiting order starting at node 0 and following successors.
    pub fn order(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.len());
        let mut node = 0;
        for _ in 0..self.len() {
            order.push(node);
            node = self.next[node];
        }
        order
    }

    /// Total closed length, walking once around the cycle from node 0.
    pub fn total_length(&self, instance: &Instance) -> f64 {
        let mut length = 0.0;
        let mut node = 0;
        for _ in 0..self.len() {
            let succ = self.next[node];
            length += instance.distance(node, succ);
            node = succ;
        }
        length
    }

    /// Checks the mutual adjacency, the rank index and the single-cycle
    /// property.
    pub fn validate(&self) -> Result<(), String> {
        let n = self.len();
        if self.prev.len() != n || self.pos.len() != n {
            return Err("adjacency arrays differ in length".into());
        }

        for i in 0..n {
            let succ = self.next[i];
            if succ >= n || self.prev[succ] != i {
                return Err(format!("prev[next[{i}]] != {i}"));
            }
            if self.pos[succ] != (self.pos[i] + 1) % n {
                return Err(format!("rank of {succ} does not follow rank of {i}"));
            }
        }

        let mut node = 0;
        for step in 1..=n {
            node = self.next[node];
            if node == 0 && step < n {
                return Err(format!("cycle through node 0 closes after {step} of {n} nodes"));
            }
        }
        if node != 0 {
            return Err("walk from node 0 does not return after N steps".into());
        }
        Ok(())
    }
}
