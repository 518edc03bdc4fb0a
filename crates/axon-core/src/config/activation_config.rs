use serde::{Deserialize, Serialize};

use super::defaults;

/// Activation network configuration.
///
/// The score combination formula is fixed as
/// `activation_weight × min(activation, 1.0) + confidence_weight × confidence`;
/// the two weights are tunable but must sum to 1.0 for calibrated output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationConfig {
    /// Default number of spreading rounds when the query does not specify one.
    pub default_levels: usize,
    /// Per-hop propagation decay factor.
    pub propagation_decay: f64,
    /// Early-stop threshold on the largest per-round activation pulse.
    pub convergence_epsilon: f64,
    /// Weight of accumulated activation in the final score.
    pub activation_weight: f64,
    /// Weight of stored node confidence in the final score.
    pub confidence_weight: f64,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            default_levels: defaults::DEFAULT_ACTIVATION_LEVELS,
            propagation_decay: defaults::DEFAULT_PROPAGATION_DECAY,
            convergence_epsilon: defaults::DEFAULT_CONVERGENCE_EPSILON,
            activation_weight: defaults::DEFAULT_ACTIVATION_WEIGHT,
            confidence_weight: defaults::DEFAULT_CONFIDENCE_WEIGHT,
        }
    }
}
