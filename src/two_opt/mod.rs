//! Candidate-guided 2-opt local search.
//!
//! Each pass visits every node `a` in index order and tries to replace the
//! tour edges `(a, succ(a))` and `(c, succ(c))` by `(a, c)` and
//! `(succ(a), succ(c))` for each candidate `c` of `a`. The first strictly
//! improving exchange for a node is applied and the scan moves on to the
//! next node. Passes repeat until one applies no move.
//!
//! # References
//!
//! - Croes, G.A. (1958). "A method for solving traveling salesman problems",
//!   *Operations Research* 6(6), 791-812.
//! - Johnson, D.S. & McGeoch, L.A. (1997). "The Traveling Salesman Problem:
//!   A Case Study in Local Optimization".

mod config;
mod runner;
mod types;

pub use config::TwoOptConfig;
pub use runner::TwoOptRunner;
pub use types::{PassOutcome, SearchState, StopReason, TwoOptResult};
