use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unordered node pair. The constructor normalizes ordering so
/// `(a, b)` and `(b, a)` address the same connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PairKey {
    pub a: String,
    pub b: String,
}

impl PairKey {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        let (x, y) = (x.into(), y.into());
        if x <= y {
            Self { a: x, b: y }
        } else {
            Self { a: y, b: x }
        }
    }

    pub fn involves(&self, node_id: &str) -> bool {
        self.a == node_id || self.b == node_id
    }

    /// The pair member that is not `node_id` (falls back to `a`).
    pub fn other(&self, node_id: &str) -> &str {
        if self.a == node_id {
            &self.b
        } else {
            &self.a
        }
    }
}

/// A learned association between two nodes that fire together.
/// Strength saturates toward 1.0 on reinforcement and decays toward 0.0
/// when unused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HebbianConnection {
    pub key: PairKey,
    pub strength: f64,
    pub last_reinforced: DateTime<Utc>,
    pub reinforcements: u64,
    pub last_context: Option<String>,
}

impl HebbianConnection {
    pub fn new(key: PairKey, now: DateTime<Utc>) -> Self {
        Self {
            key,
            strength: 0.0,
            last_reinforced: now,
            reinforcements: 0,
            last_context: None,
        }
    }
}
