use serde::{Deserialize, Serialize};

use super::defaults;

/// Query cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Total memory budget in bytes; inserts past it evict LRU entries.
    pub budget_bytes: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            budget_bytes: defaults::DEFAULT_CACHE_BUDGET_BYTES,
        }
    }
}
