//! The ActivationNetwork engine: seeds → spreading → scored candidates.

use tracing::debug;

use axon_core::config::ActivationConfig;
use axon_graph::GraphStore;

use crate::seeds::{match_seeds, Seed};
use crate::spread::spread;

/// A ranked candidate produced by either ranker.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub node_id: String,
    /// Accumulated activation (seeds can exceed 1.0 on dense graphs).
    pub activation: f64,
    /// Stored node confidence at ranking time.
    pub confidence: f64,
    /// Combined score; see [`ActivationNetwork::combine`].
    pub score: f64,
}

/// Spreading-activation ranker over the graph store.
pub struct ActivationNetwork {
    config: ActivationConfig,
}

impl ActivationNetwork {
    pub fn new(config: ActivationConfig) -> Self {
        Self { config }
    }

    /// The documented score combination:
    ///
    /// ```text
    /// score = activation_weight × min(activation, 1.0)
    ///       + confidence_weight × confidence
    /// ```
    ///
    /// Fixed for reproducibility; the two weights come from config and
    /// default to 0.7 / 0.3.
    pub fn combine(&self, activation: f64, confidence: f64) -> f64 {
        self.config.activation_weight * activation.min(1.0)
            + self.config.confidence_weight * confidence
    }

    /// Rank from explicit seeds.
    pub fn rank(
        &self,
        store: &GraphStore,
        seeds: &[Seed],
        levels: usize,
        decay: f64,
    ) -> Vec<Candidate> {
        let totals = spread(store, seeds, levels, decay, self.config.convergence_epsilon);

        let mut candidates: Vec<Candidate> = totals
            .into_iter()
            .filter_map(|(node_id, activation)| {
                // A node removed mid-propagation simply drops out.
                let node = store.node(&node_id)?;
                let confidence = node.confidence.value();
                Some(Candidate {
                    score: self.combine(activation, confidence),
                    node_id,
                    activation,
                    confidence,
                })
            })
            .collect();

        // Ties break by confidence, then lexicographic id.
        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    b.confidence
                        .partial_cmp(&a.confidence)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| a.node_id.cmp(&b.node_id))
        });

        debug!(
            seeds = seeds.len(),
            candidates = candidates.len(),
            levels,
            "activation ranking complete"
        );
        candidates
    }

    /// Rank from a query string: seed matching plus spreading.
    pub fn rank_query(
        &self,
        store: &GraphStore,
        query: &str,
        levels: usize,
    ) -> Vec<Candidate> {
        let seeds = match_seeds(store, query);
        if seeds.is_empty() {
            return Vec::new();
        }
        self.rank(store, &seeds, levels, self.config.propagation_decay)
    }
}

impl Default for ActivationNetwork {
    fn default() -> Self {
        Self::new(ActivationConfig::default())
    }
}
