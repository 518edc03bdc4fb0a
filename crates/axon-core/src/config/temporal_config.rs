use serde::{Deserialize, Serialize};

use super::defaults;

/// Bi-temporal model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemporalConfig {
    /// Both members of a co-occurring result pair must exceed this
    /// confidence before an opportunistic bi-temporal edge is grown.
    pub co_occurrence_confidence: f64,
    /// Opportunistic edge growth considers at most this many top results.
    pub co_occurrence_pair_cap: usize,
    /// Stored snapshots form a ring; the oldest drops past this count.
    pub max_snapshots: usize,
}

impl Default for TemporalConfig {
    fn default() -> Self {
        Self {
            co_occurrence_confidence: defaults::DEFAULT_CO_OCCURRENCE_CONFIDENCE,
            co_occurrence_pair_cap: defaults::DEFAULT_CO_OCCURRENCE_PAIR_CAP,
            max_snapshots: defaults::DEFAULT_MAX_TEMPORAL_SNAPSHOTS,
        }
    }
}
