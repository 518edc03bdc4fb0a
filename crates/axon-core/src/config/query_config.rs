use serde::{Deserialize, Serialize};

use super::defaults;

/// Query orchestration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Default result limit when the query options do not specify one.
    pub default_limit: usize,
    /// Base strength passed to Hebbian recording; rank weighting divides it.
    pub hebbian_base_strength: f64,
    /// Per-method timeout for composite analysis, in milliseconds.
    pub method_timeout_ms: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: defaults::DEFAULT_RESULT_LIMIT,
            hebbian_base_strength: defaults::DEFAULT_HEBBIAN_BASE_STRENGTH,
            method_timeout_ms: defaults::DEFAULT_METHOD_TIMEOUT_MS,
        }
    }
}
