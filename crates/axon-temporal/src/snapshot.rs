//! Immutable point-in-time captures of model-level stats.

use chrono::Utc;
use tracing::info;

use axon_core::models::TemporalSnapshot;

use crate::model::BiTemporalModel;

impl BiTemporalModel {
    /// Capture current counts under `name`. The snapshot is stored for
    /// later comparison and returned by value; nothing can mutate it
    /// afterwards.
    pub fn create_snapshot(&mut self, name: &str) -> TemporalSnapshot {
        let stats = self.stats();
        let snapshot = TemporalSnapshot {
            name: name.to_string(),
            taken_at: Utc::now(),
            total_edges: stats.total_edges,
            active_edges: stats.active_relationships,
            invalidated_edges: stats.total_edges - stats.active_relationships,
            revision_count: stats.revision_count,
            window_count: stats.context_windows,
        };
        info!(snapshot = %name, edges = snapshot.total_edges, "temporal snapshot created");
        self.push_snapshot(snapshot.clone());
        snapshot
    }

    /// Look up a stored snapshot by name (latest wins on duplicates).
    pub fn snapshot_named(&self, name: &str) -> Option<&TemporalSnapshot> {
        self.snapshots().iter().rev().find(|s| s.name == name)
    }
}
