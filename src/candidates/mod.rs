//! Candidate sets: the k nearest neighbors of every node.
//!
//! Candidate lists restrict which edges the 2-opt engine tries to insert.
//! They are computed once per instance, sorted by `(distance, index)`, and
//! never change afterwards.
//!
//! With the `parallel` feature the per-node scans run on the rayon pool;
//! nodes share no mutable state, so the result is identical either way.

mod builder;
mod config;
mod types;

pub use builder::build_candidates;
pub use config::CandidateConfig;
pub use types::{CandidateEdge, CandidateSet};
