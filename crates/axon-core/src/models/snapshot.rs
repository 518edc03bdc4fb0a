use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::edge::Edge;
use super::hebbian::HebbianConnection;
use super::inhibition::InhibitoryPattern;
use super::node::Node;

/// Serializable image of the graph plus the learning tables, used by the
/// periodic save/load persistence cycle. Loading replays through the
/// public upsert APIs, so a partially written image degrades to a smaller
/// graph instead of a corrupt one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemImage {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub connections: Vec<HebbianConnection>,
    pub patterns: Vec<InhibitoryPattern>,
    pub saved_at: Option<DateTime<Utc>>,
}

impl SystemImage {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
            && self.edges.is_empty()
            && self.connections.is_empty()
            && self.patterns.is_empty()
    }
}
