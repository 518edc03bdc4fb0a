use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::confidence::Confidence;

/// Relationship kind carried by an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Contains,
    DependsOn,
    RelatesTo,
    Calls,
    UsedBy,
    Imports,
    Other,
}

impl EdgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::DependsOn => "depends_on",
            Self::RelatesTo => "relates_to",
            Self::Calls => "calls",
            Self::UsedBy => "used_by",
            Self::Imports => "imports",
            Self::Other => "other",
        }
    }
}

/// A directed edge between two nodes, referenced by node id (not by owning
/// pointers) so the graph can be freely cyclic. `weight` is the propagation
/// factor used by spreading activation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub weight: f64,
    pub confidence: Confidence,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl Edge {
    /// Create an edge with the conventional derived id
    /// `source -kind-> target`. Scanners that own id stability may
    /// override it with [`Edge::with_id`].
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        kind: EdgeKind,
        weight: f64,
    ) -> Self {
        let source = source.into();
        let target = target.into();
        let id = format!("{source}-{}->{target}", kind.as_str());
        Self {
            id,
            source,
            target,
            kind,
            weight,
            confidence: Confidence::default(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Confidence::new(confidence);
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Whether the edge touches the given node id on either end.
    pub fn involves(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// Identity equality, as for nodes.
impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
