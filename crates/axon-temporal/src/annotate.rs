//! Node annotation: attach relationships valid at query time, optionally
//! merging invalidated history.

use chrono::{DateTime, Utc};

use axon_core::models::{NodeAnnotation, RelationshipSummary};

use crate::model::BiTemporalModel;

impl BiTemporalModel {
    /// Annotate each node id with its relationships as of `query_time`.
    /// With `include_history`, relationships already invalidated by then
    /// are carried in the `historical` list.
    pub fn annotate(
        &self,
        node_ids: &[String],
        query_time: DateTime<Utc>,
        include_history: bool,
    ) -> Vec<NodeAnnotation> {
        node_ids
            .iter()
            .map(|node_id| self.annotate_one(node_id, query_time, include_history))
            .collect()
    }

    fn annotate_one(
        &self,
        node_id: &str,
        query_time: DateTime<Utc>,
        include_history: bool,
    ) -> NodeAnnotation {
        let mut annotation = NodeAnnotation {
            node_id: node_id.to_string(),
            ..Default::default()
        };

        for edge in self.edges.values() {
            if !edge.involves(node_id) {
                continue;
            }
            let summary = RelationshipSummary {
                edge_id: edge.id.clone(),
                other: if edge.source == node_id {
                    edge.target.clone()
                } else {
                    edge.source.clone()
                },
                kind: edge.kind,
                since: edge.valid.start,
                until: edge.valid.end,
            };
            if edge.valid_at(query_time) {
                annotation.active.push(summary);
            } else if include_history {
                annotation.historical.push(summary);
            }
        }

        annotation.active.sort_by(|a, b| a.edge_id.cmp(&b.edge_id));
        annotation
            .historical
            .sort_by(|a, b| a.edge_id.cmp(&b.edge_id));
        annotation
    }
}
