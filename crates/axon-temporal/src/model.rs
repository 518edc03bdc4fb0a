//! The model itself: edge creation, invalidation, context windows.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use axon_core::config::TemporalConfig;
use axon_core::errors::TemporalError;
use axon_core::models::stats::TemporalStats;
use axon_core::models::{
    BiTemporalEdge, ContextWindow, DiscoveryMethod, EdgeKind, Revision, TemporalSnapshot,
    TransactionTime, ValidInterval,
};

/// Bi-temporal relationship model.
///
/// Edges are keyed by generated id. Revisions are append-only and
/// timestamp-ordered by construction; the one ordering rule enforced at
/// write time is that an edge's valid-time end can never move backward.
#[derive(Debug, Default)]
pub struct BiTemporalModel {
    pub(crate) edges: HashMap<String, BiTemporalEdge>,
    pub(crate) windows: Vec<ContextWindow>,
    current_window: Option<String>,
    snapshots: Vec<TemporalSnapshot>,
    config: TemporalConfig,
}

impl BiTemporalModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TemporalConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &TemporalConfig {
        &self.config
    }

    /// Record a newly discovered relationship, open-ended from
    /// `valid_from`. Transaction time is now; the current context window
    /// (if any) tags the edge.
    pub fn create_edge(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        kind: EdgeKind,
        valid_from: DateTime<Utc>,
        evidence: Vec<String>,
        discovery: DiscoveryMethod,
    ) -> &BiTemporalEdge {
        let now = Utc::now();
        let id = Uuid::new_v4().to_string();
        let edge = BiTemporalEdge {
            id: id.clone(),
            source: source.into(),
            target: target.into(),
            kind,
            valid: ValidInterval::open_ended(valid_from),
            recorded: TransactionTime {
                created: now,
                revisions: Vec::new(),
            },
            evidence,
            discovery,
            context_window: self.current_window.clone(),
        };
        debug!(edge = %id, source = %edge.source, target = %edge.target, "bi-temporal edge created");
        self.edges.entry(id).or_insert(edge)
    }

    /// Close a relationship's validity at `invalidation_date`, appending
    /// exactly one revision.
    ///
    /// Fails when the edge is unknown, when the date precedes the valid
    /// start, or when the edge already ends later than the requested date:
    /// the end may only move forward.
    pub fn invalidate(
        &mut self,
        edge_id: &str,
        invalidation_date: DateTime<Utc>,
        reason: &str,
        evidence: Vec<String>,
    ) -> Result<(), TemporalError> {
        let edge = self
            .edges
            .get_mut(edge_id)
            .ok_or_else(|| TemporalError::EdgeNotFound {
                id: edge_id.to_string(),
            })?;

        if invalidation_date < edge.valid.start {
            return Err(TemporalError::InvalidInterval {
                start: edge.valid.start,
                end: invalidation_date,
            });
        }
        if let Some(existing) = edge.valid.end {
            if existing > invalidation_date {
                return Err(TemporalError::InconsistentInvalidation {
                    edge_id: edge_id.to_string(),
                    existing,
                    requested: invalidation_date,
                });
            }
        }

        edge.valid.end = Some(invalidation_date);
        edge.recorded.revisions.push(Revision {
            at: Utc::now(),
            reason: reason.to_string(),
            evidence,
            valid_end: Some(invalidation_date),
        });
        info!(edge = %edge_id, %invalidation_date, reason, "relationship invalidated");
        Ok(())
    }

    pub fn edge(&self, id: &str) -> Option<&BiTemporalEdge> {
        self.edges.get(id)
    }

    /// Whether an active (open-ended) edge already links the two nodes in
    /// either direction. Used to keep opportunistic creation idempotent.
    pub fn has_active_link(&self, a: &str, b: &str) -> bool {
        self.edges.values().any(|e| {
            e.is_active()
                && ((e.source == a && e.target == b) || (e.source == b && e.target == a))
        })
    }

    // --- Context windows ---

    /// Register a context window. The interval must be well-formed.
    pub fn create_window(&mut self, window: ContextWindow) -> Result<(), TemporalError> {
        if let Some(end) = window.interval.end {
            if window.interval.start > end {
                return Err(TemporalError::InvalidInterval {
                    start: window.interval.start,
                    end,
                });
            }
        }
        info!(window = %window.name, "context window created");
        self.windows.push(window);
        Ok(())
    }

    /// Make `name` the single current window for write-tagging.
    pub fn set_current_window(&mut self, name: &str) -> Result<(), TemporalError> {
        if !self.windows.iter().any(|w| w.name == name) {
            return Err(TemporalError::WindowNotFound {
                name: name.to_string(),
            });
        }
        self.current_window = Some(name.to_string());
        Ok(())
    }

    /// Clear the current window; new edges go untagged.
    pub fn clear_current_window(&mut self) {
        self.current_window = None;
    }

    pub fn current_window(&self) -> Option<&str> {
        self.current_window.as_deref()
    }

    pub fn windows(&self) -> &[ContextWindow] {
        &self.windows
    }

    // --- Counters ---

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn active_count(&self) -> usize {
        self.edges.values().filter(|e| e.is_active()).count()
    }

    pub fn revision_count(&self) -> usize {
        self.edges.values().map(|e| e.recorded.revisions.len()).sum()
    }

    pub fn stats(&self) -> TemporalStats {
        TemporalStats {
            total_edges: self.edge_count(),
            active_relationships: self.active_count(),
            revision_count: self.revision_count(),
            context_windows: self.windows.len(),
        }
    }

    pub(crate) fn push_snapshot(&mut self, snapshot: TemporalSnapshot) {
        if self.config.max_snapshots > 0 && self.snapshots.len() >= self.config.max_snapshots {
            self.snapshots.remove(0);
        }
        self.snapshots.push(snapshot);
    }

    pub fn snapshots(&self) -> &[TemporalSnapshot] {
        &self.snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, 0, 0, 0).unwrap()
    }

    fn model_with_edge() -> (BiTemporalModel, String) {
        let mut model = BiTemporalModel::new();
        let id = model
            .create_edge(
                "src/a.ts",
                "src/b.ts",
                EdgeKind::DependsOn,
                day(1),
                vec!["import statement".into()],
                DiscoveryMethod::Scanner,
            )
            .id
            .clone();
        (model, id)
    }

    #[test]
    fn new_edges_are_open_ended() {
        let (model, id) = model_with_edge();
        let edge = model.edge(&id).unwrap();
        assert!(edge.is_active());
        assert!(edge.recorded.revisions.is_empty());
    }

    #[test]
    fn invalidation_appends_exactly_one_revision() {
        let (mut model, id) = model_with_edge();
        model
            .invalidate(&id, day(10), "refactored away", vec![])
            .unwrap();
        let edge = model.edge(&id).unwrap();
        assert_eq!(edge.valid.end, Some(day(10)));
        assert_eq!(edge.recorded.revisions.len(), 1);
    }

    #[test]
    fn the_end_date_may_only_move_forward() {
        let (mut model, id) = model_with_edge();
        model.invalidate(&id, day(10), "first", vec![]).unwrap();

        // Earlier date: rejected, no extra revision.
        let err = model.invalidate(&id, day(5), "earlier", vec![]).unwrap_err();
        assert!(matches!(err, TemporalError::InconsistentInvalidation { .. }));
        assert_eq!(model.edge(&id).unwrap().recorded.revisions.len(), 1);

        // Equal date: accepted, appends exactly one more revision.
        model.invalidate(&id, day(10), "confirmed", vec![]).unwrap();
        assert_eq!(model.edge(&id).unwrap().recorded.revisions.len(), 2);

        // Later date: accepted.
        model.invalidate(&id, day(15), "extended", vec![]).unwrap();
        assert_eq!(model.edge(&id).unwrap().valid.end, Some(day(15)));
    }

    #[test]
    fn invalidation_before_the_start_is_malformed() {
        let (mut model, id) = model_with_edge();
        let err = model
            .invalidate(&id, day(1) - chrono::Duration::days(5), "bad", vec![])
            .unwrap_err();
        assert!(matches!(err, TemporalError::InvalidInterval { .. }));
    }

    #[test]
    fn current_window_tags_new_edges() {
        let mut model = BiTemporalModel::new();
        model
            .create_window(ContextWindow {
                name: "react-18-migration".into(),
                interval: ValidInterval::open_ended(day(1)),
                description: "framework upgrade".into(),
                framework_versions: Default::default(),
            })
            .unwrap();
        model.set_current_window("react-18-migration").unwrap();

        let id = model
            .create_edge(
                "a",
                "b",
                EdgeKind::RelatesTo,
                day(2),
                vec![],
                DiscoveryMethod::Inference,
            )
            .id
            .clone();
        assert_eq!(
            model.edge(&id).unwrap().context_window.as_deref(),
            Some("react-18-migration")
        );

        model.clear_current_window();
        let id2 = model
            .create_edge(
                "a",
                "c",
                EdgeKind::RelatesTo,
                day(3),
                vec![],
                DiscoveryMethod::Inference,
            )
            .id
            .clone();
        assert!(model.edge(&id2).unwrap().context_window.is_none());
    }

    #[test]
    fn setting_an_unknown_window_fails() {
        let mut model = BiTemporalModel::new();
        assert!(matches!(
            model.set_current_window("ghost"),
            Err(TemporalError::WindowNotFound { .. })
        ));
    }
}
