//! Minimal graph-pattern query language.
//!
//! Syntax: `MATCH <source> -[<kind>]-> <target>` where either endpoint
//! may be `?`. Matches run directly against the store's live edges; the
//! bound wildcard nodes come back as the ranked list.

use std::sync::LazyLock;

use regex::Regex;

use axon_core::models::{EdgeKind, NodeSnapshot, QueryResponse, RankedResult};
use axon_graph::GraphStore;

static RE_MATCH: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)^match\s+(?P<source>\S+)\s+-\[(?P<kind>[a-z_]+)\]->\s+(?P<target>\S+)$").ok()
});

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pattern {
    source: Option<String>,
    kind: Option<EdgeKind>,
    target: Option<String>,
}

fn endpoint(raw: &str) -> Option<String> {
    (raw != "?").then(|| raw.to_string())
}

fn kind_from(raw: &str) -> Option<EdgeKind> {
    match raw {
        "contains" => Some(EdgeKind::Contains),
        "depends_on" => Some(EdgeKind::DependsOn),
        "relates_to" => Some(EdgeKind::RelatesTo),
        "calls" => Some(EdgeKind::Calls),
        "used_by" => Some(EdgeKind::UsedBy),
        "imports" => Some(EdgeKind::Imports),
        _ => None,
    }
}

fn parse(query: &str) -> Option<Pattern> {
    let captures = RE_MATCH.as_ref()?.captures(query.trim())?;
    let kind_raw = captures["kind"].to_lowercase();
    Some(Pattern {
        source: endpoint(&captures["source"]),
        // `any` wildcards the edge kind.
        kind: if kind_raw == "any" {
            None
        } else {
            Some(kind_from(&kind_raw)?)
        },
        target: endpoint(&captures["target"]),
    })
}

/// Run a MATCH query. Returns None when the syntax does not parse (the
/// caller falls through to the standard pipeline).
pub fn run(store: &GraphStore, query: &str) -> Option<QueryResponse> {
    let pattern = parse(query)?;

    let matched = store.find_edges(|e| {
        pattern.source.as_deref().map_or(true, |s| s == e.source)
            && pattern.target.as_deref().map_or(true, |t| t == e.target)
            && pattern.kind.map_or(true, |k| k == e.kind)
    });

    // The ranked list carries the bound wildcard endpoints (both ends
    // when both were pinned).
    let mut results: Vec<RankedResult> = Vec::new();
    for edge in &matched {
        let bound = match (&pattern.source, &pattern.target) {
            (None, _) => vec![edge.source.clone()],
            (_, None) => vec![edge.target.clone()],
            _ => vec![edge.source.clone(), edge.target.clone()],
        };
        for id in bound {
            if results.iter().any(|r| r.node.id == id) {
                continue;
            }
            let Some(node) = store.node(&id) else { continue };
            results.push(RankedResult {
                node: NodeSnapshot {
                    id: node.id.clone(),
                    name: node.name.clone(),
                    path: node.path.clone(),
                    kind: node.kind,
                },
                confidence: edge.confidence.value() * node.confidence.value(),
                activation: edge.weight,
                annotation: None,
            });
        }
    }
    results.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.node.id.cmp(&b.node.id))
    });

    Some(QueryResponse {
        total_matches: matched.len(),
        results,
        ..Default::default()
    })
}
