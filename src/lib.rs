//! Euclidean TSP tour optimization.
//!
//! Computes near-optimal closed tours over planar points under rounded
//! Euclidean distance (TSPLIB `EUC_2D`):
//!
//! - **Instance**: node coordinates and the distance model.
//! - **Candidates**: the k nearest neighbors of every node, the move
//!   neighborhood of the local search.
//! - **Construction**: greedy nearest-neighbor initial tour.
//! - **Tour**: array-backed doubly linked cycle with O(1) neighbor queries
//!   and shorter-side segment reversal.
//! - **2-opt**: candidate-guided first-improvement local search run to
//!   convergence, with optional time, pass and cancellation limits.
//! - **Solver**: the pipeline tying the above together.
//! - **TSPLIB**: a reader for `NODE_COORD_SECTION` instance files.
//!
//! # Examples
//!
//! ```
//! use u_tsp::{Instance, Solver, SolverConfig};
//!
//! let instance = Instance::random_uniform(200, 1000.0, 42).unwrap();
//! let result = Solver::solve(&instance, &SolverConfig::default()).unwrap();
//! assert!(result.optimized_length <= result.initial_length);
//! assert_eq!(result.order.len(), 200);
//! ```
//!
//! # Features
//!
//! - `parallel`: build candidate lists on the rayon thread pool.
//! - `serde`: `Serialize`/`Deserialize` for configs, instances and results.

pub mod candidates;
pub mod construction;
mod error;
pub mod instance;
pub mod solver;
pub mod tour;
pub mod tsplib;
pub mod two_opt;

pub use error::{Error, Result};
pub use instance::{Instance, Node};
pub use solver::{SolveResult, Solver, SolverConfig};
pub use tour::Tour;
