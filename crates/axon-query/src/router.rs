//! Syntax-based query routing (pipeline stage 2).

use std::sync::LazyLock;

use regex::Regex;

macro_rules! route_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// A bare relative path with an extension and no whitespace.
route_pattern!(RE_LITERAL_PATH, r"^[A-Za-z0-9_.\-/]+\.[A-Za-z0-9]+$");

// Temporal phrasing plus at least one ISO date.
route_pattern!(
    RE_TEMPORAL,
    r"(?i)\b(as of|valid at|valid during|between .+ and)\b"
);
route_pattern!(RE_ISO_DATE, r"\d{4}-\d{2}-\d{2}");

// Aggregate / impact phrasing.
route_pattern!(
    RE_AGGREGATE,
    r"(?i)^(count|how many|aggregate|impact of|what depends on)\b"
);

// Graph pattern language.
route_pattern!(RE_GRAPH_PATTERN, r"(?i)^match\s");

fn is_match(pattern: &LazyLock<Option<Regex>>, query: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(query))
}

/// Where a query goes before the standard pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryRoute {
    /// Stage 1: the query is a bare path; ranking is bypassed entirely.
    LiteralPath,
    /// Routed to the graph-pattern engine (`MATCH ...`).
    GraphPattern,
    /// Routed to the bi-temporal engine.
    Temporal,
    /// Routed to the aggregate/impact engine.
    Aggregate,
    /// The standard retrieval pipeline.
    Standard,
}

/// Classify a query by syntax alone; no graph access.
pub fn route(query: &str) -> QueryRoute {
    let query = query.trim();
    if is_match(&RE_LITERAL_PATH, query) {
        return QueryRoute::LiteralPath;
    }
    if is_match(&RE_GRAPH_PATTERN, query) {
        return QueryRoute::GraphPattern;
    }
    if is_match(&RE_TEMPORAL, query) && is_match(&RE_ISO_DATE, query) {
        return QueryRoute::Temporal;
    }
    if is_match(&RE_AGGREGATE, query) {
        return QueryRoute::Aggregate;
    }
    QueryRoute::Standard
}

pub(crate) fn iso_dates(query: &str) -> Vec<&str> {
    RE_ISO_DATE
        .as_ref()
        .map(|re| re.find_iter(query).map(|m| m.as_str()).collect())
        .unwrap_or_default()
}
