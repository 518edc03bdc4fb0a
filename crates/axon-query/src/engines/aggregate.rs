//! Graph-level aggregation and dependency impact, computed over a
//! petgraph projection of the store.

use std::collections::{BTreeMap, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{Bfs, Reversed};
use tracing::debug;

use axon_core::models::{AggregateData, EdgeKind, QueryResponse};
use axon_graph::GraphStore;

/// Counts by node and edge kind, over the live graph only.
pub fn summarize(store: &GraphStore) -> AggregateData {
    let mut node_counts: BTreeMap<String, usize> = BTreeMap::new();
    for node in store.nodes_iter() {
        *node_counts.entry(node.kind.as_str().to_string()).or_insert(0) += 1;
    }
    let mut edge_counts: BTreeMap<String, usize> = BTreeMap::new();
    for edge in store.edges_iter() {
        *edge_counts.entry(edge.kind.as_str().to_string()).or_insert(0) += 1;
    }
    AggregateData {
        total_nodes: store.node_count(),
        total_edges: store.edge_count(),
        node_counts,
        edge_counts,
        impacted_paths: None,
    }
}

/// Projection: one petgraph edge `dependent → dependency` per live
/// dependency-carrying edge. `used_by` reverses roles at insert time.
fn dependency_projection(store: &GraphStore) -> (DiGraph<String, f64>, HashMap<String, NodeIndex>) {
    let mut graph = DiGraph::new();
    let mut indices: HashMap<String, NodeIndex> = HashMap::new();

    let mut index_of = |graph: &mut DiGraph<String, f64>, id: &str| -> NodeIndex {
        if let Some(&idx) = indices.get(id) {
            return idx;
        }
        let idx = graph.add_node(id.to_string());
        indices.insert(id.to_string(), idx);
        idx
    };

    for edge in store.edges_iter() {
        let (dependent, dependency) = match edge.kind {
            EdgeKind::DependsOn | EdgeKind::Imports | EdgeKind::Calls => {
                (edge.source.as_str(), edge.target.as_str())
            }
            EdgeKind::UsedBy => (edge.target.as_str(), edge.source.as_str()),
            _ => continue,
        };
        let from = index_of(&mut graph, dependent);
        let to = index_of(&mut graph, dependency);
        graph.add_edge(from, to, edge.weight);
    }

    (graph, indices)
}

/// Transitive dependents of the node at `path` (by path or id): everything
/// a change there would reach, via inverse breadth-first traversal.
pub fn impact_of(store: &GraphStore, path: &str) -> Option<Vec<String>> {
    let target = store
        .find_nodes(|n| n.id == path || n.path.as_deref() == Some(path))
        .first()
        .map(|n| n.id.clone())?;

    let (graph, indices) = dependency_projection(store);
    let start = *indices.get(&target)?;

    let reversed = Reversed(&graph);
    let mut bfs = Bfs::new(reversed, start);
    let mut impacted = Vec::new();
    while let Some(idx) = bfs.next(reversed) {
        if idx != start {
            impacted.push(graph[idx].clone());
        }
    }
    impacted.sort();
    debug!(target = %target, impacted = impacted.len(), "impact computed");
    Some(impacted)
}

/// Run a routed aggregate query.
pub fn run(store: &GraphStore, query: &str) -> QueryResponse {
    let lower = query.trim().to_lowercase();
    let mut data = summarize(store);

    let impact_target = lower
        .strip_prefix("impact of ")
        .or_else(|| lower.strip_prefix("what depends on "));
    if let Some(target) = impact_target {
        data.impacted_paths = impact_of(store, target.trim());
    }

    QueryResponse {
        total_matches: data.total_nodes,
        aggregate_data: Some(data),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axon_core::models::{Edge, Node, NodeKind};

    fn store() -> GraphStore {
        let mut s = GraphStore::new();
        for id in ["src/a.ts", "src/b.ts", "src/c.ts", "src/d.ts"] {
            s.add_node(Node::new(id, NodeKind::File, id).with_path(id));
        }
        // a depends on b, b depends on c; d is unrelated.
        s.add_edge(Edge::new("src/a.ts", "src/b.ts", EdgeKind::DependsOn, 1.0))
            .unwrap();
        s.add_edge(Edge::new("src/b.ts", "src/c.ts", EdgeKind::DependsOn, 1.0))
            .unwrap();
        s
    }

    #[test]
    fn summarize_counts_by_kind() {
        let data = summarize(&store());
        assert_eq!(data.total_nodes, 4);
        assert_eq!(data.node_counts["file"], 4);
        assert_eq!(data.edge_counts["depends_on"], 2);
    }

    #[test]
    fn impact_walks_dependents_transitively() {
        let impacted = impact_of(&store(), "src/c.ts").unwrap();
        assert_eq!(impacted, vec!["src/a.ts", "src/b.ts"]);
        assert!(impact_of(&store(), "src/a.ts").unwrap().is_empty());
    }

    #[test]
    fn run_attaches_aggregate_data() {
        let response = run(&store(), "impact of src/c.ts");
        let data = response.aggregate_data.unwrap();
        assert_eq!(data.impacted_paths.unwrap().len(), 2);
    }
}
