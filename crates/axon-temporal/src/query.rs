//! Bi-temporal query execution: as-of, valid-at, valid-during, window.

use chrono::{DateTime, Utc};

use axon_core::models::{BiTemporalEdge, TemporalQuery, TemporalQueryResult, ValidInterval};

use crate::model::BiTemporalModel;

impl BiTemporalModel {
    /// Execute a bi-temporal query. All present conditions must hold.
    ///
    /// `as_of` reconstructs the edge as the system believed it at that
    /// transaction time: edges recorded later are invisible, and only
    /// revisions recorded by then contribute to the valid-time end. The
    /// remaining conditions are evaluated against that reconstruction.
    pub fn query(&self, query: &TemporalQuery) -> TemporalQueryResult {
        let mut edges: Vec<BiTemporalEdge> = self
            .edges
            .values()
            .filter_map(|edge| self.reconstruct(edge, query.as_of))
            .filter(|edge| Self::matches(edge, query, &self.window_interval(query)))
            .collect();
        edges.sort_by(|a, b| a.id.cmp(&b.id));

        let windows = match &query.context_window {
            Some(name) => self
                .windows()
                .iter()
                .filter(|w| &w.name == name)
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        TemporalQueryResult { edges, windows }
    }

    /// The interval of the queried context window, when one was named.
    fn window_interval(&self, query: &TemporalQuery) -> Option<ValidInterval> {
        let name = query.context_window.as_deref()?;
        self.windows()
            .iter()
            .find(|w| w.name == name)
            .map(|w| w.interval)
    }

    /// Transaction-time reconstruction. Returns None when the edge was not
    /// yet recorded at `as_of`.
    fn reconstruct(
        &self,
        edge: &BiTemporalEdge,
        as_of: Option<DateTime<Utc>>,
    ) -> Option<BiTemporalEdge> {
        match as_of {
            None => Some(edge.clone()),
            Some(t) => {
                if edge.recorded.created > t {
                    return None;
                }
                let mut reconstructed = edge.clone();
                reconstructed.valid.end = edge.end_as_of(t);
                reconstructed
                    .recorded
                    .revisions
                    .retain(|revision| revision.at <= t);
                Some(reconstructed)
            }
        }
    }

    fn matches(
        edge: &BiTemporalEdge,
        query: &TemporalQuery,
        window_interval: &Option<ValidInterval>,
    ) -> bool {
        if let Some(node_id) = &query.node_id {
            if !edge.involves(node_id) {
                return false;
            }
        }
        if let Some(t) = query.valid_at {
            if !edge.valid.contains(t) {
                return false;
            }
        }
        if let Some(interval) = &query.valid_during {
            if !edge.valid.overlaps(interval) {
                return false;
            }
        }
        if let Some(window) = &query.context_window {
            // Tagged membership, or validity overlapping the window span.
            let tagged = edge.context_window.as_deref() == Some(window.as_str());
            let overlapping = window_interval
                .as_ref()
                .is_some_and(|iv| edge.valid.overlaps(iv));
            if !tagged && !overlapping {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axon_core::models::{DiscoveryMethod, EdgeKind};
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, d, 0, 0, 0).unwrap()
    }

    fn model() -> (BiTemporalModel, String) {
        let mut m = BiTemporalModel::new();
        let id = m
            .create_edge(
                "a",
                "b",
                EdgeKind::DependsOn,
                day(1),
                vec![],
                DiscoveryMethod::Scanner,
            )
            .id
            .clone();
        (m, id)
    }

    #[test]
    fn valid_at_respects_the_end_date() {
        let (mut m, id) = model();
        m.invalidate(&id, day(10), "removed", vec![]).unwrap();

        let hit = m.query(&TemporalQuery {
            valid_at: Some(day(5)),
            ..Default::default()
        });
        assert_eq!(hit.edges.len(), 1);

        let miss = m.query(&TemporalQuery {
            valid_at: Some(day(11)),
            ..Default::default()
        });
        assert!(miss.edges.is_empty());
    }

    #[test]
    fn valid_during_matches_overlap() {
        let (mut m, id) = model();
        m.invalidate(&id, day(10), "removed", vec![]).unwrap();

        let overlap = m.query(&TemporalQuery {
            valid_during: Some(ValidInterval::closed(day(8), day(20))),
            ..Default::default()
        });
        assert_eq!(overlap.edges.len(), 1);

        let disjoint = m.query(&TemporalQuery {
            valid_during: Some(ValidInterval::closed(day(11), day(20))),
            ..Default::default()
        });
        assert!(disjoint.edges.is_empty());
    }

    #[test]
    fn as_of_hides_later_revisions() {
        let (mut m, id) = model();
        // The invalidation is recorded "now" (2026), far after day(10):
        // an as-of query pinned before the recording must still see the
        // edge as open-ended even though valid.end is set.
        m.invalidate(&id, day(10), "removed", vec![]).unwrap();

        let before_recording = m.query(&TemporalQuery {
            as_of: Some(day(20)),
            ..Default::default()
        });
        // The edge itself was created "now" too, so it is invisible at day 20.
        assert!(before_recording.edges.is_empty());

        let after_recording = m.query(&TemporalQuery {
            as_of: Some(Utc::now() + chrono::Duration::seconds(1)),
            ..Default::default()
        });
        assert_eq!(after_recording.edges.len(), 1);
        assert_eq!(after_recording.edges[0].valid.end, Some(day(10)));
    }

    #[test]
    fn node_filter_restricts_results() {
        let (mut m, _) = model();
        m.create_edge(
            "c",
            "d",
            EdgeKind::Calls,
            day(1),
            vec![],
            DiscoveryMethod::Scanner,
        );

        let result = m.query(&TemporalQuery {
            node_id: Some("a".into()),
            ..Default::default()
        });
        assert_eq!(result.edges.len(), 1);
        assert_eq!(result.edges[0].source, "a");
    }
}
