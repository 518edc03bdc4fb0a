//! # axon-hebbian
//!
//! "Fire together, wire together": nodes that co-occur in finalized query
//! results grow associative connections. Reinforcement saturates toward
//! 1.0; an out-of-band decay sweep shrinks whatever went unreinforced and
//! prunes what falls below epsilon. The table lives in a `DashMap` so the
//! sweep never blocks concurrent query reads.

mod learner;
mod sweep;

pub use learner::HebbianLearner;
pub use sweep::DecaySweepReport;
