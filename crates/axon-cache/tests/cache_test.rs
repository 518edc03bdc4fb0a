use axon_cache::{CacheKey, QueryCache};
use axon_core::models::{NodeKind, NodeSnapshot, QueryOptions, QueryResponse, RankedResult};

fn key(q: &str) -> CacheKey {
    CacheKey::compute(q, &QueryOptions::default())
}

/// A response padded to roughly `padding` serialized bytes.
fn padded_response(padding: usize) -> QueryResponse {
    QueryResponse {
        results: vec![RankedResult {
            node: NodeSnapshot {
                id: "n".to_string(),
                name: "x".repeat(padding),
                path: None,
                kind: NodeKind::File,
            },
            confidence: 0.5,
            activation: 0.5,
            annotation: None,
        }],
        total_matches: 1,
        ..Default::default()
    }
}

#[test]
fn exceeding_the_budget_evicts_the_least_recently_used_entry() {
    // ~600-byte entries against a 1000-byte budget: the two together
    // (~1200 bytes) cannot coexist.
    let cache = QueryCache::with_budget(1000);
    let response = padded_response(450);
    let entry_size = serde_json::to_vec(&response).unwrap().len();
    assert!(entry_size > 500 && entry_size < 1000);

    cache.insert(key("first"), &response, vec![]).unwrap();
    cache.insert(key("second"), &response, vec![]).unwrap();

    // "first" was least recently used and not re-accessed: evicted.
    assert!(cache.get(&key("first")).unwrap().is_none());
    assert!(cache.get(&key("second")).unwrap().is_some());
    assert_eq!(cache.stats().evictions, 1);
    assert!(cache.stats().memory_bytes <= 1000);
}

#[test]
fn a_recent_access_protects_an_entry_from_eviction() {
    // Three ~600-byte entries fit a 2000-byte budget; a fourth does not.
    let cache = QueryCache::with_budget(2000);
    let response = padded_response(450);

    cache.insert(key("a"), &response, vec![]).unwrap();
    cache.insert(key("b"), &response, vec![]).unwrap();
    cache.insert(key("c"), &response, vec![]).unwrap();
    cache.get(&key("a")).unwrap(); // promote "a"; "b" is now least recently used
    cache.insert(key("d"), &response, vec![]).unwrap();

    assert!(cache.get(&key("a")).unwrap().is_some());
    assert!(cache.get(&key("b")).unwrap().is_none());
}

#[test]
fn identical_queries_share_one_entry() {
    let cache = QueryCache::with_budget(100_000);
    let response = padded_response(10);
    cache.insert(key("q"), &response, vec![]).unwrap();
    cache.insert(key("q"), &response, vec![]).unwrap();
    assert_eq!(cache.len(), 1);
}

#[test]
fn hit_rate_tracks_lookups() {
    let cache = QueryCache::with_budget(100_000);
    cache
        .insert(key("q"), &padded_response(10), vec![])
        .unwrap();
    cache.get(&key("q")).unwrap();
    cache.get(&key("q")).unwrap();
    cache.get(&key("missing")).unwrap();

    let stats = cache.stats();
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 1);
    assert!((stats.hit_rate - 2.0 / 3.0).abs() < 1e-12);
}
