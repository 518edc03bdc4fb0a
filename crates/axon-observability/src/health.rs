//! Health evaluation over aggregated system stats.

use serde::{Deserialize, Serialize};

use axon_core::models::stats::SystemStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Findings-based health report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub findings: Vec<String>,
}

/// Evaluate system stats against built-in thresholds. Any finding
/// degrades the status; the finding text says what to do about it.
pub fn evaluate(stats: &SystemStats) -> HealthReport {
    let mut findings = Vec::new();

    if stats.graph.live_edges > 0 && stats.graph.dangling_edges > stats.graph.live_edges {
        findings.push(format!(
            "dangling edges ({}) outnumber live edges ({}); run maintenance compaction",
            stats.graph.dangling_edges, stats.graph.live_edges
        ));
    }

    let lookups = stats.cache.hits + stats.cache.misses;
    if lookups >= 100 && stats.cache.hit_rate < 0.1 {
        findings.push(format!(
            "cache hit rate {:.1}% over {lookups} lookups; queries may be too varied for the budget",
            stats.cache.hit_rate * 100.0
        ));
    }

    if stats.hebbian.total_connections > 0 && stats.hebbian.average_strength < 0.02 {
        findings.push(
            "hebbian connections have decayed to near zero; sweeps may be running too often"
                .to_string(),
        );
    }

    HealthReport {
        status: if findings.is_empty() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        },
        findings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_system_is_healthy() {
        let report = evaluate(&SystemStats::default());
        assert_eq!(report.status, HealthStatus::Healthy);
    }

    #[test]
    fn dangling_edge_pileup_degrades() {
        let mut stats = SystemStats::default();
        stats.graph.live_edges = 10;
        stats.graph.dangling_edges = 50;
        let report = evaluate(&stats);
        assert_eq!(report.status, HealthStatus::Degraded);
        assert_eq!(report.findings.len(), 1);
    }
}
