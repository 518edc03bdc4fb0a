//! The arena store itself: upserts, removal, predicate scans.

use std::collections::HashMap;

use chrono::Utc;
use tracing::debug;

use axon_core::errors::GraphError;
use axon_core::models::stats::GraphStats;
use axon_core::models::{Edge, EdgeKind, Node};

/// Stable handle into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(pub(crate) usize);

/// Stable handle into the edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeHandle(pub(crate) usize);

/// Adjacency entry, keyed by node id so a node removed and later
/// re-ingested under the same id picks its relationships back up.
#[derive(Debug, Default, Clone)]
pub(crate) struct Adjacency {
    pub(crate) out: Vec<EdgeHandle>,
    pub(crate) inc: Vec<EdgeHandle>,
}

/// In-memory knowledge graph store.
///
/// All lookups resolve through `id → handle` maps; slots hold immutable
/// value types and updates replace the whole value (copy-on-write).
/// Scans are full predicate scans; strategy selection by graph size is
/// the caller's concern.
#[derive(Debug, Default)]
pub struct GraphStore {
    pub(crate) nodes: Vec<Option<Node>>,
    pub(crate) edges: Vec<Option<Edge>>,
    node_index: HashMap<String, NodeHandle>,
    edge_index: HashMap<String, EdgeHandle>,
    pub(crate) adjacency: HashMap<String, Adjacency>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Nodes ---

    /// Insert or replace a node (last-write-wins; a duplicate id is an
    /// upsert, never an error). Returns the node's stable handle.
    pub fn add_node(&mut self, mut node: Node) -> NodeHandle {
        node.last_updated = Utc::now();
        if let Some(&handle) = self.node_index.get(&node.id) {
            self.nodes[handle.0] = Some(node);
            return handle;
        }
        let handle = NodeHandle(self.nodes.len());
        self.node_index.insert(node.id.clone(), handle);
        self.adjacency.entry(node.id.clone()).or_default();
        self.nodes.push(Some(node));
        handle
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        let handle = self.node_index.get(id)?;
        self.nodes[handle.0].as_ref()
    }

    pub fn node_by_handle(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle.0)?.as_ref()
    }

    pub fn handle(&self, id: &str) -> Option<NodeHandle> {
        self.node_index.get(id).copied()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Copy-on-write update: build a replacement from the current value.
    /// The id is pinned: a replacement may not rename the node.
    pub fn update_node(
        &mut self,
        id: &str,
        f: impl FnOnce(&Node) -> Node,
    ) -> Result<(), GraphError> {
        let handle = *self
            .node_index
            .get(id)
            .ok_or_else(|| GraphError::NodeNotFound { id: id.to_string() })?;
        let current = self.nodes[handle.0]
            .as_ref()
            .ok_or_else(|| GraphError::NodeNotFound { id: id.to_string() })?;
        let mut replacement = f(current);
        replacement.id = id.to_string();
        replacement.last_updated = Utc::now();
        self.nodes[handle.0] = Some(replacement);
        Ok(())
    }

    /// Replace just the stored confidence of a node.
    pub fn set_node_confidence(&mut self, id: &str, confidence: f64) -> Result<(), GraphError> {
        self.update_node(id, |n| {
            let mut n = n.clone();
            n.confidence = confidence.into();
            n
        })
    }

    /// Detach a node. Edges referencing it become dangling and stay in the
    /// arena until a reader filters them or `compact_dangling` runs, with no
    /// eager cascade.
    pub fn remove_node(&mut self, id: &str) -> bool {
        match self.node_index.remove(id) {
            Some(handle) => {
                self.nodes[handle.0] = None;
                debug!(node = %id, "node removed; incident edges now dangling");
                true
            }
            None => false,
        }
    }

    // --- Edges ---

    /// Insert or replace an edge. Both endpoints must resolve to live
    /// nodes, and a `contains` edge may not loop onto its own node.
    pub fn add_edge(&mut self, edge: Edge) -> Result<EdgeHandle, GraphError> {
        if !self.contains_node(&edge.source) {
            return Err(GraphError::NodeNotFound {
                id: edge.source.clone(),
            });
        }
        if !self.contains_node(&edge.target) {
            return Err(GraphError::NodeNotFound {
                id: edge.target.clone(),
            });
        }
        if edge.kind == EdgeKind::Contains && edge.source == edge.target {
            return Err(GraphError::SelfContainment {
                id: edge.source.clone(),
            });
        }

        if let Some(&handle) = self.edge_index.get(&edge.id) {
            // Upsert may move the edge between node pairs; detach the old
            // adjacency entries before re-attaching.
            if let Some(old) = self.edges[handle.0].take() {
                self.detach_adjacency(&old, handle);
            }
            self.attach_adjacency(&edge, handle);
            self.edges[handle.0] = Some(edge);
            return Ok(handle);
        }

        let handle = EdgeHandle(self.edges.len());
        self.edge_index.insert(edge.id.clone(), handle);
        self.attach_adjacency(&edge, handle);
        self.edges.push(Some(edge));
        Ok(handle)
    }

    /// Look up a live edge by id. Dangling records are invisible here,
    /// matching every other reader.
    pub fn edge(&self, id: &str) -> Option<&Edge> {
        let handle = self.edge_index.get(id)?;
        let edge = self.edges[handle.0].as_ref()?;
        self.is_live(edge).then_some(edge)
    }

    pub(crate) fn is_live(&self, edge: &Edge) -> bool {
        self.contains_node(&edge.source) && self.contains_node(&edge.target)
    }

    fn attach_adjacency(&mut self, edge: &Edge, handle: EdgeHandle) {
        self.adjacency
            .entry(edge.source.clone())
            .or_default()
            .out
            .push(handle);
        self.adjacency
            .entry(edge.target.clone())
            .or_default()
            .inc
            .push(handle);
    }

    fn detach_adjacency(&mut self, edge: &Edge, handle: EdgeHandle) {
        if let Some(adj) = self.adjacency.get_mut(&edge.source) {
            adj.out.retain(|&h| h != handle);
        }
        if let Some(adj) = self.adjacency.get_mut(&edge.target) {
            adj.inc.retain(|&h| h != handle);
        }
    }

    // --- Scans ---

    /// Full predicate scan over live nodes.
    pub fn find_nodes(&self, pred: impl Fn(&Node) -> bool) -> Vec<&Node> {
        self.nodes
            .iter()
            .filter_map(|slot| slot.as_ref())
            .filter(|n| pred(n))
            .collect()
    }

    /// Full predicate scan over live edges; dangling records are skipped.
    pub fn find_edges(&self, pred: impl Fn(&Edge) -> bool) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter_map(|slot| slot.as_ref())
            .filter(|e| self.is_live(e) && pred(e))
            .collect()
    }

    pub fn nodes_iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter_map(|slot| slot.as_ref())
    }

    pub fn edges_iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges
            .iter()
            .filter_map(|slot| slot.as_ref())
            .filter(|e| self.is_live(e))
    }

    // --- Maintenance ---

    /// Drop dangling edge records and their adjacency references.
    /// Runs out-of-band; readers never need it for correctness.
    pub fn compact_dangling(&mut self) -> usize {
        let dangling: Vec<(usize, String)> = self
            .edges
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|e| (i, e)))
            .filter(|(_, e)| !self.is_live(e))
            .map(|(i, e)| (i, e.id.clone()))
            .collect();

        for (index, id) in &dangling {
            if let Some(edge) = self.edges[*index].take() {
                let handle = EdgeHandle(*index);
                self.detach_adjacency(&edge, handle);
            }
            self.edge_index.remove(id);
        }
        if !dangling.is_empty() {
            debug!(compacted = dangling.len(), "dangling edges compacted");
        }
        dangling.len()
    }

    // --- Counters & export ---

    pub fn node_count(&self) -> usize {
        self.node_index.len()
    }

    /// Live edges only.
    pub fn edge_count(&self) -> usize {
        self.edges_iter().count()
    }

    pub fn dangling_edge_count(&self) -> usize {
        self.edges
            .iter()
            .filter_map(|slot| slot.as_ref())
            .filter(|e| !self.is_live(e))
            .count()
    }

    pub fn stats(&self) -> GraphStats {
        GraphStats {
            live_nodes: self.node_count(),
            live_edges: self.edge_count(),
            dangling_edges: self.dangling_edge_count(),
        }
    }

    /// Clone out the live graph for persistence.
    pub fn export(&self) -> (Vec<Node>, Vec<Edge>) {
        (
            self.nodes_iter().cloned().collect(),
            self.edges_iter().cloned().collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axon_core::models::NodeKind;

    fn file(id: &str) -> Node {
        Node::new(id, NodeKind::File, id).with_path(id)
    }

    #[test]
    fn duplicate_id_is_an_upsert_with_a_stable_handle() {
        let mut store = GraphStore::new();
        let h1 = store.add_node(file("src/a.ts").with_confidence(0.4));
        let h2 = store.add_node(file("src/a.ts").with_confidence(0.9));
        assert_eq!(h1, h2);
        assert_eq!(store.node_count(), 1);
        assert_eq!(store.node("src/a.ts").unwrap().confidence.value(), 0.9);
    }

    #[test]
    fn contains_self_loop_is_rejected() {
        let mut store = GraphStore::new();
        store.add_node(file("src/a.ts"));
        let err = store
            .add_edge(Edge::new("src/a.ts", "src/a.ts", EdgeKind::Contains, 1.0))
            .unwrap_err();
        assert!(matches!(err, GraphError::SelfContainment { .. }));
    }

    #[test]
    fn edge_to_missing_node_is_rejected() {
        let mut store = GraphStore::new();
        store.add_node(file("src/a.ts"));
        let err = store
            .add_edge(Edge::new("src/a.ts", "ghost", EdgeKind::DependsOn, 1.0))
            .unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound { .. }));
    }

    #[test]
    fn removal_leaves_dangling_edges_invisible_to_readers() {
        let mut store = GraphStore::new();
        store.add_node(file("src/a.ts"));
        store.add_node(file("src/b.ts"));
        store
            .add_edge(Edge::new("src/a.ts", "src/b.ts", EdgeKind::DependsOn, 0.8))
            .unwrap();

        assert!(store.remove_node("src/b.ts"));
        assert_eq!(store.edge_count(), 0);
        assert_eq!(store.dangling_edge_count(), 1);
        assert!(store.find_edges(|_| true).is_empty());
        assert!(store.edge("src/a.ts-depends_on->src/b.ts").is_none());
    }

    #[test]
    fn reingesting_a_removed_node_revives_its_edges() {
        let mut store = GraphStore::new();
        store.add_node(file("src/a.ts"));
        store.add_node(file("src/b.ts"));
        store
            .add_edge(Edge::new("src/a.ts", "src/b.ts", EdgeKind::DependsOn, 0.8))
            .unwrap();

        store.remove_node("src/b.ts");
        store.add_node(file("src/b.ts"));
        assert_eq!(store.edge_count(), 1);
        assert_eq!(store.dangling_edge_count(), 0);
    }

    #[test]
    fn compact_dangling_drops_dead_records() {
        let mut store = GraphStore::new();
        store.add_node(file("src/a.ts"));
        store.add_node(file("src/b.ts"));
        store
            .add_edge(Edge::new("src/a.ts", "src/b.ts", EdgeKind::DependsOn, 0.8))
            .unwrap();
        store.remove_node("src/b.ts");

        assert_eq!(store.compact_dangling(), 1);
        assert_eq!(store.dangling_edge_count(), 0);
    }

    #[test]
    fn update_node_pins_the_id() {
        let mut store = GraphStore::new();
        store.add_node(file("src/a.ts"));
        store
            .update_node("src/a.ts", |n| {
                let mut n = n.clone();
                n.id = "renamed".to_string();
                n.confidence = 0.2.into();
                n
            })
            .unwrap();
        assert!(store.node("renamed").is_none());
        assert_eq!(store.node("src/a.ts").unwrap().confidence.value(), 0.2);
    }
}
