use serde::{Deserialize, Serialize};

use super::defaults;

/// Hebbian learner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HebbianConfig {
    /// Learning rate for saturating reinforcement.
    pub learning_rate: f64,
    /// Multiplicative decay applied to unreinforced connections per sweep.
    pub decay_rate: f64,
    /// Connections below this strength are pruned during a sweep.
    pub prune_epsilon: f64,
}

impl Default for HebbianConfig {
    fn default() -> Self {
        Self {
            learning_rate: defaults::DEFAULT_LEARNING_RATE,
            decay_rate: defaults::DEFAULT_HEBBIAN_DECAY_RATE,
            prune_epsilon: defaults::DEFAULT_PRUNE_EPSILON,
        }
    }
}
