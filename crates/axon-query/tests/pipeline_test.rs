use axon_core::config::AxonConfig;
use axon_core::errors::{AxonError, AxonResult, QueryError};
use axon_core::models::{
    DiscoveryMethod, EdgeKind, FailureDetails, NodeKind, QueryOptions, RankedResult,
};
use axon_core::traits::ContextBooster;
use axon_query::QueryOrchestrator;
use test_fixtures::{edge, file_node, sample_project_store};

fn orchestrator() -> QueryOrchestrator {
    let mut orch = QueryOrchestrator::default();
    let store = sample_project_store();
    let (nodes, edges) = store.export();
    for n in nodes {
        orch.add_node(n);
    }
    for e in edges {
        orch.add_edge(e).unwrap();
    }
    orch
}

/// Options with all learning and annotation stages bypassed: the pure
/// deterministic retrieval configuration.
fn frozen_options() -> QueryOptions {
    QueryOptions {
        bypass_inhibition: true,
        bypass_hebbian_learning: true,
        bypass_bi_temporal: true,
        ..Default::default()
    }
}

// --- Validation ---

#[test]
fn empty_and_malformed_queries_are_rejected_before_the_pipeline() {
    let mut orch = orchestrator();
    assert!(matches!(
        orch.query("   ", &QueryOptions::default()),
        Err(AxonError::Query(QueryError::EmptyQuery))
    ));
    let options = QueryOptions {
        limit: 0,
        ..Default::default()
    };
    assert!(matches!(
        orch.query("auth", &options),
        Err(AxonError::Query(QueryError::InvalidOptions { .. }))
    ));
}

// --- Cache idempotence (§ testable properties) ---

#[test]
fn identical_queries_hit_the_cache_with_identical_results() {
    let mut orch = orchestrator();
    let options = QueryOptions::default();

    let first = orch.query("where is auth handled", &options).unwrap();
    assert!(!first.cache_hit);

    let second = orch.query("where is auth handled", &options).unwrap();
    assert!(second.cache_hit);
    assert_eq!(first, second);
    assert!(orch.cache().stats().hits >= 1);
}

#[test]
fn bypass_cache_skips_both_lookup_and_store() {
    let mut orch = orchestrator();
    let options = QueryOptions {
        bypass_cache: true,
        ..Default::default()
    };

    orch.query("auth", &options).unwrap();
    let repeat = orch.query("auth", &options).unwrap();
    assert!(!repeat.cache_hit);
    assert!(orch.cache().is_empty());
}

// --- Determinism (§ testable properties) ---

#[test]
fn frozen_pipeline_returns_an_identical_ranked_order() {
    let mut orch = orchestrator();
    let mut options = frozen_options();
    options.bypass_cache = true; // force full recomputation each time

    let first = orch.query("auth login", &options).unwrap();
    for _ in 0..5 {
        let again = orch.query("auth login", &options).unwrap();
        assert_eq!(first.results, again.results);
    }
}

// --- Routing ---

#[test]
fn literal_paths_bypass_ranking() {
    let mut orch = orchestrator();
    let response = orch.query("src/auth.ts", &QueryOptions::default()).unwrap();
    // The file node plus the function node sharing its path.
    assert_eq!(response.results.len(), 2);
    assert_eq!(response.results[0].node.id, "src/auth.ts");
    assert_eq!(response.results[0].confidence, 0.9);
}

#[test]
fn aggregate_queries_return_aggregate_data() {
    let mut orch = orchestrator();
    let response = orch
        .query("how many files are there", &QueryOptions::default())
        .unwrap();
    let data = response.aggregate_data.expect("aggregate data");
    assert_eq!(data.node_counts["file"], 5);
    assert!(response.results.is_empty());
}

#[test]
fn graph_pattern_queries_bind_wildcards_against_live_edges() {
    let mut orch = orchestrator();
    let response = orch
        .query("MATCH src/auth.ts -[relates_to]-> ?", &QueryOptions::default())
        .unwrap();
    assert_eq!(response.total_matches, 1);
    assert_eq!(response.results[0].node.id, "src/login.ts");
}

#[test]
fn temporal_queries_return_temporal_data() {
    let mut orch = orchestrator();
    orch.temporal_mut().create_edge(
        "src/auth.ts",
        "src/login.ts",
        EdgeKind::DependsOn,
        chrono::Utc::now() - chrono::Duration::days(30),
        vec![],
        DiscoveryMethod::Scanner,
    );

    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let response = orch
        .query(&format!("relationships valid at {today}"), &QueryOptions::default())
        .unwrap();
    assert_eq!(response.temporal_data.expect("temporal data").edges.len(), 1);
}

// --- Inhibition wiring (§ testable properties scenario) ---

#[test]
fn a_learned_failure_suppresses_matching_results() {
    let mut orch = orchestrator();
    orch.add_node(file_node("src/x.ts", 0.8));

    let mut options = frozen_options();
    options.bypass_cache = true;
    let before = orch.query("parse config src", &options).unwrap();
    let confidence_before = before
        .results
        .iter()
        .find(|r| r.node.id == "src/x.ts")
        .map(|r| r.confidence)
        .expect("src/x.ts ranked before learning");

    orch.learn_from_failure(
        "parse config",
        &FailureDetails::new("import"),
        &["src/x.ts".to_string()],
        None,
    );

    let mut inhibited_options = frozen_options();
    inhibited_options.bypass_cache = true;
    inhibited_options.bypass_inhibition = false;
    let after = orch.query("parse config src", &inhibited_options).unwrap();
    let confidence_after = after
        .results
        .iter()
        .find(|r| r.node.id == "src/x.ts")
        .map(|r| r.confidence);

    // Strictly reduced, or removed entirely.
    match confidence_after {
        Some(c) => assert!(c < confidence_before),
        None => {}
    }
}

#[test]
fn bypassing_inhibition_leaves_results_untouched() {
    let mut orch = orchestrator();
    orch.add_node(file_node("src/x.ts", 0.8));
    orch.learn_from_failure(
        "parse config",
        &FailureDetails::new("import"),
        &["src/x.ts".to_string()],
        None,
    );

    let mut options = frozen_options();
    options.bypass_cache = true;
    let bypassed = orch.query("parse config src", &options).unwrap();

    options.bypass_inhibition = false;
    let applied = orch.query("parse config src", &options).unwrap();

    let bypassed_conf = bypassed
        .results
        .iter()
        .find(|r| r.node.id == "src/x.ts")
        .map(|r| r.confidence);
    let applied_conf = applied
        .results
        .iter()
        .find(|r| r.node.id == "src/x.ts")
        .map(|r| r.confidence);
    assert!(bypassed_conf.unwrap() > applied_conf.unwrap_or(0.0));
}

// --- Hard failure: poisoned ranking input ---

#[test]
fn a_non_finite_edge_weight_is_a_hard_ranking_failure() {
    let mut orch = QueryOrchestrator::default();
    orch.add_node(file_node("src/boom.ts", 0.9));
    orch.add_node(file_node("src/other.ts", 0.9));
    orch.add_edge(edge(
        "src/boom.ts",
        "src/other.ts",
        EdgeKind::RelatesTo,
        f64::INFINITY,
        1.0,
    ))
    .unwrap();

    let err = orch.query("boom", &QueryOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        AxonError::Query(QueryError::RankingFailed { .. })
    ));
}

// --- Pattern node creation ---

#[test]
fn recurring_failures_spawn_a_pattern_node() {
    let mut orch = orchestrator();
    let files = vec!["src/x.ts".to_string()];
    orch.add_node(file_node("src/x.ts", 0.8));

    for _ in 0..3 {
        orch.learn_from_failure("parse config", &FailureDetails::new("import"), &files, None);
    }

    let patterns = orch
        .store()
        .find_nodes(|n| n.kind == NodeKind::Pattern);
    assert_eq!(patterns.len(), 1);
    assert!(patterns[0].name.contains("parse config"));
}

// --- Hebbian wiring ---

#[test]
fn queries_record_co_activation_unless_bypassed() {
    let mut orch = orchestrator();
    let mut options = QueryOptions::default();
    options.bypass_cache = true;

    orch.query("auth login", &options).unwrap();
    assert!(!orch.hebbian().is_empty());

    let recorded = orch.hebbian().len();
    options.bypass_hebbian_learning = true;
    orch.query("session database", &options).unwrap();
    assert_eq!(orch.hebbian().len(), recorded);
}

// --- Bi-temporal stage ---

#[test]
fn co_occurring_confident_results_grow_a_relates_to_edge() {
    let mut orch = QueryOrchestrator::default();
    // Two strongly confident, strongly linked nodes that both rank high.
    orch.add_node(file_node("src/pay.ts", 1.0));
    orch.add_node(file_node("src/payment.ts", 1.0));
    orch.add_edge(edge(
        "src/pay.ts",
        "src/payment.ts",
        EdgeKind::RelatesTo,
        1.0,
        1.0,
    ))
    .unwrap();

    let mut options = QueryOptions::default();
    options.bypass_cache = true;
    orch.query("pay payment", &options).unwrap();

    assert!(orch.temporal().edge_count() >= 1);
    assert!(orch
        .temporal()
        .has_active_link("src/pay.ts", "src/payment.ts"));

    // Idempotent across repeats: no duplicate active link.
    let count = orch.temporal().edge_count();
    orch.query("pay payment", &options).unwrap();
    assert_eq!(orch.temporal().edge_count(), count);
}

#[test]
fn co_occurrence_growth_respects_the_configured_threshold() {
    let mut config = AxonConfig::default();
    // Nothing can exceed this, so stage 8 must grow no edges.
    config.temporal.co_occurrence_confidence = 1.1;
    let mut orch = QueryOrchestrator::new(config);
    orch.add_node(file_node("src/pay.ts", 1.0));
    orch.add_node(file_node("src/payment.ts", 1.0));
    orch.add_edge(edge(
        "src/pay.ts",
        "src/payment.ts",
        EdgeKind::RelatesTo,
        1.0,
        1.0,
    ))
    .unwrap();

    let options = QueryOptions {
        bypass_cache: true,
        ..Default::default()
    };
    orch.query("pay payment", &options).unwrap();
    assert_eq!(orch.temporal().edge_count(), 0);
}

#[test]
fn annotations_appear_unless_bi_temporal_is_bypassed() {
    let mut orch = orchestrator();
    orch.temporal_mut().create_edge(
        "src/auth.ts",
        "src/login.ts",
        EdgeKind::DependsOn,
        chrono::Utc::now() - chrono::Duration::days(10),
        vec![],
        DiscoveryMethod::Scanner,
    );

    let mut options = QueryOptions::default();
    options.bypass_cache = true;
    let annotated = orch.query("auth", &options).unwrap();
    let auth = annotated
        .results
        .iter()
        .find(|r| r.node.id == "src/auth.ts")
        .unwrap();
    assert!(auth.annotation.as_ref().is_some_and(|a| !a.active.is_empty()));

    options.bypass_bi_temporal = true;
    let plain = orch.query("auth", &options).unwrap();
    assert!(plain.results.iter().all(|r| r.annotation.is_none()));
}

// --- Stage failure recovery ---

struct FailingBooster;

impl ContextBooster for FailingBooster {
    fn boost(&self, _results: Vec<RankedResult>, _level: u8) -> AxonResult<Vec<RankedResult>> {
        Err(AxonError::Config {
            reason: "collaborator offline".to_string(),
        })
    }
}

#[test]
fn a_failing_auxiliary_stage_never_blocks_retrieval() {
    let mut orch = QueryOrchestrator::new(AxonConfig::default())
        .with_booster(Box::new(FailingBooster));
    let store = sample_project_store();
    let (nodes, edges) = store.export();
    for n in nodes {
        orch.add_node(n);
    }
    for e in edges {
        orch.add_edge(e).unwrap();
    }

    let response = orch.query("auth", &QueryOptions::default()).unwrap();
    assert!(!response.results.is_empty());
    assert_eq!(orch.stage_failure_count(), 1);
}

// --- Attention ---

#[test]
fn attention_truncates_to_the_limit_unless_bypassed() {
    let mut orch = orchestrator();
    let mut options = QueryOptions {
        limit: 1,
        bypass_cache: true,
        ..Default::default()
    };

    let truncated = orch.query("auth login session", &options).unwrap();
    assert_eq!(truncated.results.len(), 1);
    assert!(truncated.total_matches > 1);

    options.bypass_attention = true;
    let full = orch.query("auth login session", &options).unwrap();
    assert!(full.results.len() > 1);
}

// --- Stats & invalidation ---

#[test]
fn system_stats_aggregate_every_subsystem() {
    let mut orch = orchestrator();
    orch.query("auth", &QueryOptions::default()).unwrap();
    let stats = orch.system_stats();
    assert_eq!(stats.graph.live_nodes, 6);
    assert!(stats.cache.entries >= 1);
}

#[test]
fn path_change_notifications_invalidate_matching_cache_entries() {
    let mut orch = orchestrator();
    let options = QueryOptions::default();
    orch.query("auth", &options).unwrap();
    assert!(!orch.cache().is_empty());

    let removed = orch.notify_paths_changed(&["src/auth.ts".to_string()]);
    assert!(removed >= 1);

    let after = orch.query("auth", &options).unwrap();
    assert!(!after.cache_hit);
}

#[test]
fn maintenance_compacts_dangling_edges() {
    let mut orch = orchestrator();
    orch.store_mut().remove_node("src/session.ts");
    assert_eq!(orch.store().dangling_edge_count(), 1);

    let report = orch.run_maintenance();
    assert_eq!(report.compacted_edges, 1);
    assert_eq!(orch.store().dangling_edge_count(), 0);
}
