use serde::{Deserialize, Serialize};

use super::defaults;

/// Confidence fusion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Variance threshold above which modality disagreement counts as conflict.
    pub conflict_variance_threshold: f64,
    /// Multiplicative penalty applied to the fused confidence on conflict.
    pub conflict_penalty: f64,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            conflict_variance_threshold: defaults::DEFAULT_CONFLICT_VARIANCE_THRESHOLD,
            conflict_penalty: defaults::DEFAULT_CONFLICT_PENALTY,
        }
    }
}
