use axon_activation::{match_seeds, ActivationNetwork, Seed};
use axon_core::config::ActivationConfig;
use axon_core::models::{Edge, EdgeKind, Node, NodeKind};
use axon_graph::GraphStore;

/// The reference scenario: auth.ts (0.9) --relates_to(w=0.8)--> login.ts
/// (0.7), seeded at auth.ts with match score 1.0, one round, decay 0.5.
fn scenario_store() -> GraphStore {
    let mut store = GraphStore::new();
    store.add_node(
        Node::new("auth.ts", NodeKind::File, "auth.ts")
            .with_path("auth.ts")
            .with_confidence(0.9),
    );
    store.add_node(
        Node::new("login.ts", NodeKind::File, "login.ts")
            .with_path("login.ts")
            .with_confidence(0.7),
    );
    store
        .add_edge(
            Edge::new("auth.ts", "login.ts", EdgeKind::RelatesTo, 0.8).with_confidence(1.0),
        )
        .unwrap();
    store
}

#[test]
fn reference_scenario_matches_literal_constants() {
    let store = scenario_store();
    let network = ActivationNetwork::default();
    let seeds = vec![Seed {
        node_id: "auth.ts".to_string(),
        score: 1.0,
    }];

    let ranked = network.rank(&store, &seeds, 1, 0.5);
    assert_eq!(ranked.len(), 2);

    let b = ranked.iter().find(|c| c.node_id == "login.ts").unwrap();
    // Accumulated activation: 1.0 × 0.8 × 1.0 × 0.5
    assert!((b.activation - 0.4).abs() < 1e-12);
    // Documented combination: 0.7 × 0.4 + 0.3 × 0.7
    assert!((b.score - 0.49).abs() < 1e-12);

    let a = ranked.iter().find(|c| c.node_id == "auth.ts").unwrap();
    // 0.7 × min(1.0, 1.0) + 0.3 × 0.9
    assert!((a.score - 0.97).abs() < 1e-12);
    assert_eq!(ranked[0].node_id, "auth.ts");
}

#[test]
fn ranking_is_deterministic_on_a_fixed_graph() {
    let store = scenario_store();
    let network = ActivationNetwork::default();

    let first = network.rank_query(&store, "auth", 3);
    for _ in 0..5 {
        let again = network.rank_query(&store, "auth", 3);
        assert_eq!(first, again);
    }
}

#[test]
fn zero_levels_scores_seeds_only() {
    let store = scenario_store();
    let network = ActivationNetwork::default();
    let seeds = match_seeds(&store, "auth.ts");

    let ranked = network.rank(&store, &seeds, 0, 0.5);
    assert!(ranked.iter().all(|c| c.node_id != "login.ts"));
}

#[test]
fn custom_weights_shift_the_combination() {
    let config = ActivationConfig {
        activation_weight: 0.5,
        confidence_weight: 0.5,
        ..Default::default()
    };
    let store = scenario_store();
    let network = ActivationNetwork::new(config);
    let seeds = vec![Seed {
        node_id: "auth.ts".to_string(),
        score: 1.0,
    }];

    let ranked = network.rank(&store, &seeds, 1, 0.5);
    let b = ranked.iter().find(|c| c.node_id == "login.ts").unwrap();
    assert!((b.score - (0.5 * 0.4 + 0.5 * 0.7)).abs() < 1e-12);
}
