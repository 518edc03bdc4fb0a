//! Literal-path fast path (pipeline stage 1).

use axon_core::models::{NodeSnapshot, QueryResponse, RankedResult};
use axon_graph::GraphStore;

/// Resolve a bare path directly against the graph, bypassing ranking.
/// Returns None when nothing matches the path so the caller can fall
/// through to the standard pipeline.
pub fn resolve(store: &GraphStore, query: &str) -> Option<QueryResponse> {
    let query = query.trim();
    let mut nodes = store.find_nodes(|n| n.id == query || n.path.as_deref() == Some(query));
    if nodes.is_empty() {
        return None;
    }
    nodes.sort_by(|a, b| a.id.cmp(&b.id));

    let results: Vec<RankedResult> = nodes
        .into_iter()
        .map(|n| RankedResult {
            node: NodeSnapshot {
                id: n.id.clone(),
                name: n.name.clone(),
                path: n.path.clone(),
                kind: n.kind,
            },
            confidence: n.confidence.value(),
            activation: 1.0,
            annotation: None,
        })
        .collect();

    Some(QueryResponse {
        total_matches: results.len(),
        results,
        ..Default::default()
    })
}
