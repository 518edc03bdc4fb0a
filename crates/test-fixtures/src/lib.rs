//! Shared builders for a small, realistic project graph.

use axon_core::models::{Edge, EdgeKind, Node, NodeKind};
use axon_graph::GraphStore;

/// A file node whose id is its path.
pub fn file_node(path: &str, confidence: f64) -> Node {
    let name = path.rsplit('/').next().unwrap_or(path);
    Node::new(path, NodeKind::File, name)
        .with_path(path)
        .with_confidence(confidence)
}

/// A function node with a composite id under `path`.
pub fn function_node(path: &str, name: &str, confidence: f64) -> Node {
    Node::new(format!("{path}#fn:{name}"), NodeKind::Function, name)
        .with_path(path)
        .with_confidence(confidence)
}

/// An edge with an explicit confidence.
pub fn edge(source: &str, target: &str, kind: EdgeKind, weight: f64, confidence: f64) -> Edge {
    Edge::new(source, target, kind, weight).with_confidence(confidence)
}

/// A small authentication-flavored project graph:
///
/// ```text
/// src/auth.ts (0.9) --relates_to(0.8)--> src/login.ts (0.7)
/// src/auth.ts --contains--> src/auth.ts#fn:authenticate
/// src/login.ts --depends_on--> src/session.ts
/// src/config/parse.ts, src/db.ts: unconnected extras
/// ```
pub fn sample_project_store() -> GraphStore {
    let mut store = GraphStore::new();

    store.add_node(file_node("src/auth.ts", 0.9));
    store.add_node(file_node("src/login.ts", 0.7));
    store.add_node(file_node("src/session.ts", 0.8));
    store.add_node(file_node("src/config/parse.ts", 0.6));
    store.add_node(file_node("src/db.ts", 0.75));
    store.add_node(function_node("src/auth.ts", "authenticate", 0.85));

    let edges = [
        edge("src/auth.ts", "src/login.ts", EdgeKind::RelatesTo, 0.8, 1.0),
        edge(
            "src/auth.ts",
            "src/auth.ts#fn:authenticate",
            EdgeKind::Contains,
            1.0,
            1.0,
        ),
        edge(
            "src/login.ts",
            "src/session.ts",
            EdgeKind::DependsOn,
            0.6,
            0.9,
        ),
    ];
    for e in edges {
        // The fixture graph is well-formed by construction.
        let _ = store.add_edge(e);
    }
    store
}
