use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::confidence::Confidence;

/// What kind of project entity a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    File,
    Directory,
    Function,
    Class,
    Error,
    Pattern,
    Concept,
    Other,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
            Self::Function => "function",
            Self::Class => "class",
            Self::Error => "error",
            Self::Pattern => "pattern",
            Self::Concept => "concept",
            Self::Other => "other",
        }
    }
}

/// A knowledge graph node. Identity is the id, which is globally unique and
/// immutable; composite ids (`src/auth.ts#class:Auth`) let several nodes
/// share one path. Nodes are immutable value types: updates replace the
/// stored value rather than mutating shared state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub name: String,
    pub path: Option<String>,
    pub confidence: Confidence,
    /// Open metadata bag populated by scanners.
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
    pub last_updated: DateTime<Utc>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            path: None,
            confidence: Confidence::default(),
            metadata: BTreeMap::new(),
            last_updated: Utc::now(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
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

    /// Whether this node lives at (or under) the given path.
    pub fn touches_path(&self, path: &str) -> bool {
        self.path.as_deref().is_some_and(|p| p == path || p.starts_with(path))
    }
}

/// Identity equality: two nodes are equal if they share an id.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composite_ids_share_a_path() {
        let a = Node::new("src/auth.ts#class:Auth", NodeKind::Class, "Auth")
            .with_path("src/auth.ts");
        let b = Node::new("src/auth.ts", NodeKind::File, "auth.ts").with_path("src/auth.ts");
        assert_ne!(a, b);
        assert!(a.touches_path("src/auth.ts"));
        assert!(b.touches_path("src/auth.ts"));
    }
}
