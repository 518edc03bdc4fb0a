//! # axon-activation
//!
//! Candidate ranking for stage 4 of the query pipeline. The default
//! ranker spreads activation outward from query-matched seeds in
//! round-bounded breadth-first pulses; the linear ranker is a cheap
//! substring fallback for callers that want to skip graph propagation.

mod linear;
mod network;
mod seeds;
mod spread;

pub use linear::linear_rank;
pub use network::{ActivationNetwork, Candidate};
pub use seeds::{match_seeds, Seed};
pub use spread::spread;
