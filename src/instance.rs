//! Problem instance and the distance model.
//!
//! An [`Instance`] owns the node coordinates of one run. It is read-only
//! after construction; candidate lists and tour adjacency live in their own
//! index-addressed structures.

use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A point of the instance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// External 1-based identifier (TSPLIB node number).
    pub id: usize,
    pub x: f64,
    pub y: f64,
}

impl Node {
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

/// Rounded Euclidean distance between two nodes (TSPLIB `EUC_2D`).
///
/// Rounds to the nearest integer with ties away from zero.
#[inline]
pub fn rounded_euclidean(a: &Node, b: &Node) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt().round()
}

/// A Euclidean TSP instance.
///
/// # Examples
///
/// ```
/// use u_tsp::Instance;
///
/// let instance = Instance::from_coords(&[(0.0, 0.0), (3.0, 4.0)]).unwrap();
/// assert_eq!(instance.len(), 2);
/// assert_eq!(instance.distance(0, 1), 5.0);
/// assert_eq!(instance.node(1).id, 2);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<Node>", into = "Vec<Node>"))]
pub struct Instance {
    nodes: Vec<Node>,
}

impl TryFrom<Vec<Node>> for Instance {
    type Error = Error;

    fn try_from(nodes: Vec<Node>) -> Result<Self> {
        Self::new(nodes)
    }
}

impl From<Instance> for Vec<Node> {
    fn from(instance: Instance) -> Self {
        instance.nodes
    }
}

impl Instance {
    /// Builds an instance from nodes.
    ///
    /// Fails with [`Error::InvalidInstance`] when `nodes` is empty or any
    /// coordinate is not finite.
    pub fn new(nodes: Vec<Node>) -> Result<Self> {
        if nodes.is_empty() {
            return Err(Error::invalid_instance("instance has no nodes"));
        }
        if let Some(node) = nodes.iter().find(|n| !n.x.is_finite() || !n.y.is_finite()) {
            return Err(Error::invalid_instance(format!(
                "node {} has non-finite coordinates ({}, {})",
                node.id, node.x, node.y
            )));
        }
        Ok(Self { nodes })
    }

    /// Builds an instance from bare coordinates, numbering nodes `1..=N`.
    pub fn from_coords(coords: &[(f64, f64)]) -> Result<Self> {
        let mut nodes = Vec::new();
        nodes
            .try_reserve_exact(coords.len())
            .map_err(|e| Error::allocation(format!("{} nodes: {e}", coords.len())))?;
        nodes.extend(
            coords
                .iter()
                .enumerate()
                .map(|(i, &(x, y))| Node::new(i + 1, x, y)),
        );
        Self::new(nodes)
    }

    /// Uniformly random points in `[0, extent)²`, reproducible by `seed`.
    pub fn random_uniform(n: usize, extent: f64, seed: u64) -> Result<Self> {
        if !(extent.is_finite() && extent > 0.0) {
            return Err(Error::invalid_instance(format!(
                "extent must be positive and finite, got {extent}"
            )));
        }
        let mut nodes = Vec::new();
        nodes
            .try_reserve_exact(n)
            .map_err(|e| Error::allocation(format!("{n} nodes: {e}")))?;

        let mut rng = StdRng::seed_from_u64(seed);
        for i in 0..n {
            let x = rng.random_range(0.0..extent);
            let y = rng.random_range(0.0..extent);
            nodes.push(Node::new(i + 1, x, y));
        }
        Self::new(nodes)
    }

    /// Number of nodes (N).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, i: usize) -> &Node {
        &self.nodes[i]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Rounded Euclidean distance between node indices `i` and `j`.
    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        rounded_euclidean(&self.nodes[i], &self.nodes[j])
    }

    /// Length of the closed tour visiting `order` and returning to its start.
    pub fn order_length(&self, order: &[usize]) -> f64 {
        if order.len() < 2 {
            return 0.0;
        }
        let closing = self.distance(order[order.len() - 1], order[0]);
        order
            .windows(2)
            .map(|w| self.distance(w[0], w[1]))
            .sum::<f64>()
            + closing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_distance_rounds_to_nearest() {
        let instance = Instance::from_coords(&[(0.0, 0.0), (1.0, 1.0), (0.0, 2.5)]).unwrap();
        // sqrt(2) = 1.414..
        assert_eq!(instance.distance(0, 1), 1.0);
        // exact half rounds away from zero
        assert_eq!(instance.distance(0, 2), 3.0);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let instance = Instance::from_coords(&[(12.5, -3.0)]).unwrap();
        assert_eq!(instance.distance(0, 0), 0.0);
    }

    #[test]
    fn test_empty_instance_rejected() {
        let err = Instance::new(vec![]).unwrap_err();
        assert!(matches!(err, Error::InvalidInstance(_)));
    }

    #[test]
    fn test_non_finite_coordinate_rejected() {
        let err = Instance::from_coords(&[(0.0, 0.0), (f64::NAN, 1.0)]).unwrap_err();
        assert!(matches!(err, Error::InvalidInstance(_)));
    }

    #[test]
    fn test_from_coords_assigns_one_based_ids() {
        let instance = Instance::from_coords(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]).unwrap();
        let ids: Vec<usize> = instance.nodes().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_random_uniform_is_reproducible() {
        let a = Instance::random_uniform(50, 1000.0, 7).unwrap();
        let b = Instance::random_uniform(50, 1000.0, 7).unwrap();
        assert_eq!(a.nodes(), b.nodes());
        assert!(a
            .nodes()
            .iter()
            .all(|n| (0.0..1000.0).contains(&n.x) && (0.0..1000.0).contains(&n.y)));
    }

    #[test]
    fn test_random_uniform_reports_allocation_failure() {
        let err = Instance::random_uniform(usize::MAX / 8, 10.0, 1).unwrap_err();
        assert!(matches!(err, Error::Allocation(_)));
    }

    #[test]
    fn test_try_from_nodes_validates() {
        assert!(Instance::try_from(Vec::new()).is_err());
        let nodes = vec![Node::new(1, 0.0, 0.0), Node::new(2, f64::INFINITY, 0.0)];
        assert!(matches!(
            Instance::try_from(nodes),
            Err(Error::InvalidInstance(_))
        ));
        let instance = Instance::try_from(vec![Node::new(1, 2.0, 3.0)]).unwrap();
        assert_eq!(Vec::<Node>::from(instance), vec![Node::new(1, 2.0, 3.0)]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates_nodes() {
        assert!(serde_json::from_str::<Instance>("[]").is_err());
        assert!(serde_json::from_str::<Instance>(r#"[{"id":1,"x":0.0,"y":1e999}]"#).is_err());

        let instance = Instance::from_coords(&[(0.0, 0.0), (3.0, 4.0)]).unwrap();
        let json = serde_json::to_string(&instance).unwrap();
        let back: Instance = serde_json::from_str(&json).unwrap();
        assert_eq!(back.nodes(), instance.nodes());
    }

    #[test]
    fn test_random_uniform_bad_extent() {
        assert!(Instance::random_uniform(10, 0.0, 1).is_err());
        assert!(Instance::random_uniform(10, f64::INFINITY, 1).is_err());
    }

    #[test]
    fn test_order_length_square() {
        let instance =
            Instance::from_coords(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]).unwrap();
        assert_eq!(instance.order_length(&[0, 1, 2, 3]), 40.0);
        assert_eq!(instance.order_length(&[2]), 0.0);
    }

    proptest! {
        #[test]
        fn prop_distance_symmetric(
            coords in prop::collection::vec((-1e4f64..1e4, -1e4f64..1e4), 2..30),
        ) {
            let instance = Instance::from_coords(&coords).unwrap();
            for i in 0..instance.len() {
                prop_assert_eq!(instance.distance(i, i), 0.0);
                for j in 0..instance.len() {
                    prop_assert_eq!(instance.distance(i, j), instance.distance(j, i));
                }
            }
        }
    }
}
