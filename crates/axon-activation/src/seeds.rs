//! Seed selection: matching query text against node names and paths.

use axon_core::config::defaults;
use axon_graph::GraphStore;

/// A query-matched node and its match score, used as the starting
/// activation for spreading.
#[derive(Debug, Clone, PartialEq)]
pub struct Seed {
    pub node_id: String,
    pub score: f64,
}

/// Score one node name/path pair against the query. Exact name matches
/// dominate; path matches are the weakest signal.
fn match_score(query: &str, tokens: &[String], name: &str, path: Option<&str>) -> f64 {
    if name == query {
        return defaults::SEED_EXACT_MATCH;
    }
    let name_lower = name.to_lowercase();
    if name_lower == query.to_lowercase() {
        return defaults::SEED_CASE_INSENSITIVE_MATCH;
    }
    let mut best = 0.0f64;
    for token in tokens {
        if name_lower.contains(token.as_str()) {
            best = best.max(defaults::SEED_NAME_SUBSTRING);
        } else if path.is_some_and(|p| p.to_lowercase().contains(token.as_str())) {
            best = best.max(defaults::SEED_PATH_SUBSTRING);
        }
    }
    best
}

/// Find seed nodes for a query. Every live node is scored; nodes with a
/// zero match score are not seeds.
pub fn match_seeds(store: &GraphStore, query: &str) -> Vec<Seed> {
    let query = query.trim();
    let tokens: Vec<String> = query
        .split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .filter(|t| t.len() >= 3)
        .collect();

    let mut seeds: Vec<Seed> = store
        .nodes_iter()
        .filter_map(|n| {
            let score = match_score(query, &tokens, &n.name, n.path.as_deref());
            (score > 0.0).then(|| Seed {
                node_id: n.id.clone(),
                score,
            })
        })
        .collect();

    // Deterministic seed order: score desc, then id asc.
    seeds.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.node_id.cmp(&b.node_id))
    });
    seeds
}
