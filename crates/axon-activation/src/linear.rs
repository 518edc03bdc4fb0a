//! Linear substring ranker, the low-cost stage 4 fallback.
//!
//! No graph propagation: the match score stands in for activation and the
//! same score combination keeps output comparable with the default ranker.

use axon_core::config::ActivationConfig;
use axon_graph::GraphStore;

use crate::network::{ActivationNetwork, Candidate};
use crate::seeds::match_seeds;

/// Rank nodes by direct query match only.
pub fn linear_rank(store: &GraphStore, query: &str, config: &ActivationConfig) -> Vec<Candidate> {
    let network = ActivationNetwork::new(config.clone());
    let seeds = match_seeds(store, query);
    // Zero levels of spreading: seeds rank on their own match strength.
    network.rank(store, &seeds, 0, config.propagation_decay)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axon_core::models::{Edge, EdgeKind, Node, NodeKind};

    #[test]
    fn linear_rank_ignores_graph_structure() {
        let mut store = GraphStore::new();
        store.add_node(Node::new("auth", NodeKind::File, "auth").with_confidence(0.9));
        store.add_node(Node::new("other", NodeKind::File, "other").with_confidence(0.9));
        store
            .add_edge(Edge::new("auth", "other", EdgeKind::RelatesTo, 1.0))
            .unwrap();

        let ranked = linear_rank(&store, "auth", &ActivationConfig::default());
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].node_id, "auth");
    }
}
