//! Composite multi-method analysis with per-method timeouts.
//!
//! Each sub-method runs under its own `tokio::time::timeout`; a method
//! that overruns is replaced by its typed empty value instead of failing
//! the whole report. This is the orchestration layer's only cancellation
//! mechanism; there is no mid-pipeline cancellation of a single query.

use std::time::Duration;

use tracing::warn;

use axon_core::models::{AggregateData, QueryOptions, QueryResponse, TemporalSnapshot};

use crate::engines;
use crate::orchestrator::QueryOrchestrator;

/// Aggregated output of a comprehensive analysis. A `None` field means
/// that method timed out or failed and was degraded, not that the system
/// had nothing to say.
#[derive(Debug, Default)]
pub struct AnalysisReport {
    pub retrieval: Option<QueryResponse>,
    pub temporal_summary: Option<TemporalSnapshot>,
    pub aggregate: Option<AggregateData>,
    /// Names of methods replaced by their empty value.
    pub degraded: Vec<String>,
}

impl QueryOrchestrator {
    /// Run retrieval, a temporal snapshot, and a graph aggregate summary
    /// as one composite report, degrading per method on timeout.
    pub async fn comprehensive_analysis(
        &mut self,
        text: &str,
        options: &QueryOptions,
    ) -> AnalysisReport {
        let budget = Duration::from_millis(self.config.method_timeout_ms);
        let mut report = AnalysisReport::default();

        match tokio::time::timeout(budget, async { self.query(text, options) }).await {
            Ok(Ok(response)) => report.retrieval = Some(response),
            Ok(Err(e)) => {
                warn!(error = %e, "analysis retrieval failed");
                report.degraded.push("retrieval".to_string());
            }
            Err(_) => report.degraded.push("retrieval".to_string()),
        }

        match tokio::time::timeout(budget, async {
            self.temporal_mut().create_snapshot("comprehensive-analysis")
        })
        .await
        {
            Ok(snapshot) => report.temporal_summary = Some(snapshot),
            Err(_) => report.degraded.push("temporal".to_string()),
        }

        match tokio::time::timeout(budget, async { engines::aggregate::summarize(self.store()) })
            .await
        {
            Ok(aggregate) => report.aggregate = Some(aggregate),
            Err(_) => report.degraded.push("aggregate".to_string()),
        }

        report
    }
}
