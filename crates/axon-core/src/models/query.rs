use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::node::NodeKind;
use super::temporal::{BiTemporalEdge, ContextWindow, NodeAnnotation};
use crate::constants::{MAX_ACTIVATION_LEVELS, MAX_RESULT_LIMIT};
use crate::errors::QueryError;

/// Which candidate ranker stage 4 uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingStrategy {
    /// Spreading activation over the graph (default).
    Activation,
    /// Lower-cost linear substring match.
    Linear,
}

/// Immutable per-query options. One value carries every stage bypass flag
/// so the pipeline ordering contract stays mechanically enforceable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    pub limit: usize,
    pub activation_levels: usize,
    pub ranking: RankingStrategy,
    pub bypass_cache: bool,
    pub bypass_inhibition: bool,
    pub bypass_context_boost: bool,
    pub bypass_attention: bool,
    pub bypass_bi_temporal: bool,
    pub bypass_hebbian_learning: bool,
    pub bypass_fusion: bool,
    /// Hierarchical context level passed to the boost collaborator.
    pub context_level: u8,
    /// Restrict bi-temporal annotation to validity at this instant.
    pub valid_at: Option<DateTime<Utc>>,
    /// Merge historically invalidated relationships into annotations.
    pub include_history: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            limit: crate::config::defaults::DEFAULT_RESULT_LIMIT,
            activation_levels: crate::config::defaults::DEFAULT_ACTIVATION_LEVELS,
            ranking: RankingStrategy::Activation,
            bypass_cache: false,
            bypass_inhibition: false,
            bypass_context_boost: false,
            bypass_attention: false,
            bypass_bi_temporal: false,
            bypass_hebbian_learning: false,
            bypass_fusion: false,
            context_level: 0,
            valid_at: None,
            include_history: false,
        }
    }
}

impl QueryOptions {
    /// Reject malformed options before the pipeline starts.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.limit == 0 {
            return Err(QueryError::InvalidOptions {
                reason: "limit must be at least 1".into(),
            });
        }
        if self.limit > MAX_RESULT_LIMIT {
            return Err(QueryError::InvalidOptions {
                reason: format!("limit {} exceeds maximum {MAX_RESULT_LIMIT}", self.limit),
            });
        }
        if self.activation_levels > MAX_ACTIVATION_LEVELS {
            return Err(QueryError::InvalidOptions {
                reason: format!(
                    "activation_levels {} exceeds maximum {MAX_ACTIVATION_LEVELS}",
                    self.activation_levels
                ),
            });
        }
        Ok(())
    }

    /// Canonical representation used for cache keying. `bypass_cache` is
    /// masked out: it controls cache participation, not result content.
    pub fn cache_fingerprint(&self) -> String {
        let mut normalized = self.clone();
        normalized.bypass_cache = false;
        serde_json::to_string(&normalized).unwrap_or_default()
    }
}

/// The ordered pipeline stages. The slice order IS the execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    LiteralPath,
    Routing,
    CacheLookup,
    Ranking,
    Inhibition,
    ContextBoost,
    Attention,
    BiTemporal,
    HebbianRecording,
    Fusion,
    CacheStore,
}

impl PipelineStage {
    /// Execution order of the full pipeline.
    pub const ORDER: [PipelineStage; 11] = [
        Self::LiteralPath,
        Self::Routing,
        Self::CacheLookup,
        Self::Ranking,
        Self::Inhibition,
        Self::ContextBoost,
        Self::Attention,
        Self::BiTemporal,
        Self::HebbianRecording,
        Self::Fusion,
        Self::CacheStore,
    ];

    /// Whether the given options bypass this stage. Ranking and routing
    /// are not bypassable; the cache flag covers both cache stages.
    pub fn bypassed_by(self, options: &QueryOptions) -> bool {
        match self {
            Self::CacheLookup | Self::CacheStore => options.bypass_cache,
            Self::Inhibition => options.bypass_inhibition,
            Self::ContextBoost => options.bypass_context_boost,
            Self::Attention => options.bypass_attention,
            Self::BiTemporal => options.bypass_bi_temporal,
            Self::HebbianRecording => options.bypass_hebbian_learning,
            Self::Fusion => options.bypass_fusion,
            Self::LiteralPath | Self::Routing | Self::Ranking => false,
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LiteralPath => "literal_path",
            Self::Routing => "routing",
            Self::CacheLookup => "cache_lookup",
            Self::Ranking => "ranking",
            Self::Inhibition => "inhibition",
            Self::ContextBoost => "context_boost",
            Self::Attention => "attention",
            Self::BiTemporal => "bi_temporal",
            Self::HebbianRecording => "hebbian_recording",
            Self::Fusion => "fusion",
            Self::CacheStore => "cache_store",
        };
        f.write_str(name)
    }
}

/// Lightweight projection of a node carried in query results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: String,
    pub name: String,
    pub path: Option<String>,
    pub kind: NodeKind,
}

/// One ranked result. `confidence` is the displayed score, re-derived by
/// fusion at the end of the pipeline; `activation` is the raw accumulated
/// activation from the ranking stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub node: NodeSnapshot,
    pub confidence: f64,
    pub activation: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<NodeAnnotation>,
}

/// Payload attached when the query was routed to the temporal engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemporalData {
    pub edges: Vec<BiTemporalEdge>,
    pub windows: Vec<ContextWindow>,
}

/// Payload attached when the query was routed to the aggregate engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregateData {
    pub node_counts: BTreeMap<String, usize>,
    pub edge_counts: BTreeMap<String, usize>,
    pub total_nodes: usize,
    pub total_edges: usize,
    /// Transitive dependents of the queried path, when an impact query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impacted_paths: Option<Vec<String>>,
}

/// Final query output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    pub results: Vec<RankedResult>,
    /// Candidate count before attention truncation.
    pub total_matches: usize,
    pub query_time_ms: u64,
    pub cache_hit: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal_data: Option<TemporalData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate_data: Option<AggregateData>,
}

impl QueryResponse {
    /// All file paths this response touches, for path-scoped cache
    /// invalidation.
    pub fn touched_paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self
            .results
            .iter()
            .filter_map(|r| r.node.path.clone())
            .collect();
        paths.sort();
        paths.dedup();
        paths
    }
}

/// PartialEq intentionally ignores timing: two responses are "the same
/// answer" when their results and route payloads agree.
impl PartialEq for QueryResponse {
    fn eq(&self, other: &Self) -> bool {
        self.results == other.results && self.total_matches == other.total_matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_validate() {
        assert!(QueryOptions::default().validate().is_ok());
    }

    #[test]
    fn zero_limit_is_rejected() {
        let opts = QueryOptions {
            limit: 0,
            ..Default::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn cache_fingerprint_masks_the_cache_flag_only() {
        let base = QueryOptions::default();
        let bypassed = QueryOptions {
            bypass_cache: true,
            ..Default::default()
        };
        let different = QueryOptions {
            limit: 25,
            ..Default::default()
        };
        assert_eq!(base.cache_fingerprint(), bypassed.cache_fingerprint());
        assert_ne!(base.cache_fingerprint(), different.cache_fingerprint());
    }

    #[test]
    fn stage_order_starts_with_literal_path_and_ends_with_cache_store() {
        assert_eq!(PipelineStage::ORDER[0], PipelineStage::LiteralPath);
        assert_eq!(PipelineStage::ORDER[10], PipelineStage::CacheStore);
    }
}
