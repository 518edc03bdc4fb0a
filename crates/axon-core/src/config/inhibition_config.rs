use serde::{Deserialize, Serialize};

use super::defaults;

/// Inhibitory system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InhibitionConfig {
    /// Strength assigned to a newly learned failure pattern.
    pub initial_strength: f64,
    /// Saturating reinforcement rate on repeated identical failures.
    pub reinforcement_rate: f64,
    /// Multiplicative decay applied to unreinforced patterns per sweep.
    pub decay_rate: f64,
    /// Candidates whose inhibited confidence falls below this are removed.
    pub confidence_floor: f64,
    /// Reinforcement count at which a pattern node is spawned in the graph.
    pub pattern_node_threshold: u64,
}

impl Default for InhibitionConfig {
    fn default() -> Self {
        Self {
            initial_strength: defaults::DEFAULT_INITIAL_PATTERN_STRENGTH,
            reinforcement_rate: defaults::DEFAULT_REINFORCEMENT_RATE,
            decay_rate: defaults::DEFAULT_INHIBITION_DECAY_RATE,
            confidence_floor: defaults::DEFAULT_CONFIDENCE_FLOOR,
            pattern_node_threshold: defaults::DEFAULT_PATTERN_NODE_THRESHOLD,
        }
    }
}
