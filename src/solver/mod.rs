//! End-to-end pipeline: candidates → nearest-neighbor tour → 2-opt.
//!
//! [`Solver`] wires the components together for one instance and reports
//! the initial and optimized lengths together with the visiting order.

mod config;
mod runner;

pub use config::SolverConfig;
pub use runner::{SolveResult, Solver};
