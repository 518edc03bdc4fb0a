//! Read-side views over adjacency, with live-edge filtering.

use axon_core::models::{Edge, Node};

use crate::store::{GraphStore, NodeHandle};

/// One hop from a node: the connecting edge and the node on the far side.
#[derive(Debug, Clone, Copy)]
pub struct NeighborLink<'a> {
    pub edge: &'a Edge,
    pub neighbor: &'a Node,
    /// True when the edge points away from the queried node.
    pub outgoing: bool,
}

impl GraphStore {
    /// Every live link touching `id`, outgoing then incoming. Dangling
    /// edges and edges to removed nodes are filtered here, not at
    /// mutation time.
    pub fn neighbors(&self, id: &str) -> Vec<NeighborLink<'_>> {
        let mut links = Vec::new();
        let Some(adj) = self.adjacency.get(id) else {
            return links;
        };

        for &handle in &adj.out {
            let Some(edge) = self.edges.get(handle.0).and_then(|s| s.as_ref()) else {
                continue;
            };
            if let Some(neighbor) = self.node(&edge.target) {
                if self.contains_node(&edge.source) {
                    links.push(NeighborLink {
                        edge,
                        neighbor,
                        outgoing: true,
                    });
                }
            }
        }
        for &handle in &adj.inc {
            let Some(edge) = self.edges.get(handle.0).and_then(|s| s.as_ref()) else {
                continue;
            };
            if let Some(neighbor) = self.node(&edge.source) {
                if self.contains_node(&edge.target) {
                    links.push(NeighborLink {
                        edge,
                        neighbor,
                        outgoing: false,
                    });
                }
            }
        }
        links
    }

    /// Live outgoing edges of `id`.
    pub fn outgoing(&self, id: &str) -> Vec<&Edge> {
        self.neighbors(id)
            .into_iter()
            .filter(|l| l.outgoing)
            .map(|l| l.edge)
            .collect()
    }

    /// Live incoming edges of `id`.
    pub fn incoming(&self, id: &str) -> Vec<&Edge> {
        self.neighbors(id)
            .into_iter()
            .filter(|l| !l.outgoing)
            .map(|l| l.edge)
            .collect()
    }

    /// Resolve a handle list to live nodes, skipping holes.
    pub fn resolve_handles<'a>(&'a self, handles: &[NodeHandle]) -> Vec<&'a Node> {
        handles
            .iter()
            .filter_map(|&h| self.node_by_handle(h))
            .collect()
    }
}
