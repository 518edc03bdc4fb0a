use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::edge::EdgeKind;

/// Valid-time interval: when a fact was/is true in the world.
/// `end = None` means the fact is still valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidInterval {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl ValidInterval {
    pub fn open_ended(start: DateTime<Utc>) -> Self {
        Self { start, end: None }
    }

    pub fn closed(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Whether `t` falls inside the interval (end-inclusive; an open end
    /// means "valid through now").
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && self.end.map_or(true, |end| t <= end)
    }

    /// Whether two intervals overlap, treating open ends as unbounded.
    pub fn overlaps(&self, other: &ValidInterval) -> bool {
        let starts_before_other_ends = other.end.map_or(true, |end| self.start <= end);
        let other_starts_before_self_ends = self.end.map_or(true, |end| other.start <= end);
        starts_before_other_ends && other_starts_before_self_ends
    }
}

/// One append-only entry in an edge's transaction-time history.
/// `valid_end` records the valid-time end this revision established
/// (None for the creation revision).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Revision {
    pub at: DateTime<Utc>,
    pub reason: String,
    pub evidence: Vec<String>,
    pub valid_end: Option<DateTime<Utc>>,
}

/// Transaction-time record: when the system learned about the fact, and
/// the ordered trail of what it believed since.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionTime {
    pub created: DateTime<Utc>,
    pub revisions: Vec<Revision>,
}

/// How a bi-temporal relationship was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryMethod {
    Scanner,
    CoOccurrence,
    Inference,
    Manual,
}

/// A relationship with both valid time (when it was true) and transaction
/// time (when the system learned it).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiTemporalEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub valid: ValidInterval,
    pub recorded: TransactionTime,
    pub evidence: Vec<String>,
    pub discovery: DiscoveryMethod,
    /// Name of the context window that was current when the edge was written.
    pub context_window: Option<String>,
}

impl BiTemporalEdge {
    /// Whether the relationship is valid at `t` (by current knowledge).
    pub fn valid_at(&self, t: DateTime<Utc>) -> bool {
        self.valid.contains(t)
    }

    /// Whether the relationship is still open-ended.
    pub fn is_active(&self) -> bool {
        self.valid.end.is_none()
    }

    /// The valid-time end as the system believed it at transaction time
    /// `as_of`: only revisions recorded by then count.
    pub fn end_as_of(&self, as_of: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.recorded
            .revisions
            .iter()
            .filter(|r| r.at <= as_of)
            .next_back()
            .and_then(|r| r.valid_end)
    }

    pub fn involves(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// A named interval grouping related relationship changes, e.g. a
/// framework migration period. At most one window is "current" at a time
/// and tags edges written while it is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextWindow {
    pub name: String,
    pub interval: ValidInterval,
    pub description: String,
    /// Framework-version snapshot taken when the window was opened.
    #[serde(default)]
    pub framework_versions: BTreeMap<String, String>,
}

/// Immutable capture of model-level counts for later comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporalSnapshot {
    pub name: String,
    pub taken_at: DateTime<Utc>,
    pub total_edges: usize,
    pub active_edges: usize,
    pub invalidated_edges: usize,
    pub revision_count: usize,
    pub window_count: usize,
}

/// Bi-temporal query. Conditions combine conjunctively; all are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemporalQuery {
    /// Transaction-time snapshot: reconstruct what the system believed then.
    pub as_of: Option<DateTime<Utc>>,
    /// Point-in-time validity.
    pub valid_at: Option<DateTime<Utc>>,
    /// Interval-overlap validity.
    pub valid_during: Option<ValidInterval>,
    /// Restrict to edges tagged with (or overlapping) this context window.
    pub context_window: Option<String>,
    /// Restrict to edges touching this node.
    pub node_id: Option<String>,
}

/// Result of a bi-temporal query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemporalQueryResult {
    pub edges: Vec<BiTemporalEdge>,
    pub windows: Vec<ContextWindow>,
}

/// A relationship attached to a node annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipSummary {
    pub edge_id: String,
    pub other: String,
    pub kind: EdgeKind,
    pub since: DateTime<Utc>,
    pub until: Option<DateTime<Utc>>,
}

/// Per-node temporal annotation produced by the enhancement pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeAnnotation {
    pub node_id: String,
    /// Relationships valid at the query time.
    pub active: Vec<RelationshipSummary>,
    /// Invalidated relationships, included only when history was requested.
    pub historical: Vec<RelationshipSummary>,
}
