use serde::{Deserialize, Serialize};

/// Graph store counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub live_nodes: usize,
    pub live_edges: usize,
    /// Edges whose endpoints no longer resolve; filtered lazily by readers.
    pub dangling_edges: usize,
}

/// Query cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub memory_bytes: usize,
    pub budget_bytes: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
    pub evictions: u64,
    /// Inserts refused because a single entry exceeded the whole budget.
    pub oversize_rejections: u64,
}

/// Hebbian table counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HebbianStats {
    pub total_connections: usize,
    pub average_strength: f64,
    /// Connection counts per 0.1-wide strength bucket.
    pub strength_distribution: [usize; 10],
}

/// Inhibitory table counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InhibitionStats {
    pub total_patterns: usize,
    pub average_strength: f64,
    /// Fingerprint of the strongest pattern, if any.
    pub strongest: Option<String>,
}

/// Bi-temporal model counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemporalStats {
    pub total_edges: usize,
    pub active_relationships: usize,
    pub revision_count: usize,
    pub context_windows: usize,
}

/// One roll-up across every stateful subsystem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemStats {
    pub graph: GraphStats,
    pub cache: CacheStats,
    pub hebbian: HebbianStats,
    pub inhibition: InhibitionStats,
    pub temporal: TemporalStats,
}
