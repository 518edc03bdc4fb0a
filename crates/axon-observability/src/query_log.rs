//! Query performance logging: text, route, latency, result count, cache
//! hits, stage failures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use axon_core::config::defaults;

/// A single query log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub query: String,
    /// Which engine handled it: "pipeline", "literal", "temporal", "aggregate".
    pub route: String,
    pub latency_ms: u64,
    pub result_count: usize,
    pub cache_hit: bool,
    pub stage_failures: usize,
    pub at: DateTime<Utc>,
}

impl QueryLogEntry {
    pub fn new(
        query: impl Into<String>,
        route: impl Into<String>,
        latency_ms: u64,
        result_count: usize,
        cache_hit: bool,
        stage_failures: usize,
    ) -> Self {
        Self {
            query: query.into(),
            route: route.into(),
            latency_ms,
            result_count,
            cache_hit,
            stage_failures,
            at: Utc::now(),
        }
    }
}

/// Bounded ring of recent query records.
#[derive(Debug, Clone)]
pub struct QueryLog {
    entries: VecDeque<QueryLogEntry>,
    max_entries: usize,
}

impl QueryLog {
    pub fn new() -> Self {
        Self::with_capacity(defaults::DEFAULT_QUERY_LOG_CAPACITY)
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            max_entries,
        }
    }

    /// Record a query, dropping the oldest entry past capacity.
    pub fn record(&mut self, entry: QueryLogEntry) {
        tracing::debug!(
            query = %entry.query,
            route = %entry.route,
            latency_ms = entry.latency_ms,
            result_count = entry.result_count,
            cache_hit = entry.cache_hit,
            "query logged"
        );
        if self.entries.len() == self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// The most recent `n` entries, newest first.
    pub fn recent(&self, n: usize) -> Vec<&QueryLogEntry> {
        self.entries.iter().rev().take(n).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fraction of logged queries served from cache.
    pub fn cache_hit_share(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let hits = self.entries.iter().filter(|e| e.cache_hit).count();
        hits as f64 / self.entries.len() as f64
    }
}

impl Default for QueryLog {
    fn default() -> Self {
        Self::new()
    }
}
