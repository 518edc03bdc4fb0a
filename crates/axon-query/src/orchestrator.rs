//! The QueryOrchestrator: owns every stateful subsystem and runs the
//! fixed stage order per query.
//!
//! Failure semantics: a ranking failure is hard and aborts the query;
//! stages 5-10 are best-effort, so an error there is logged, metered, and
//! the pipeline continues with the previous stage's output.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info, warn};

use axon_activation::{linear_rank, ActivationNetwork, Candidate};
use axon_cache::{CacheKey, QueryCache};
use axon_core::config::{ActivationConfig, AxonConfig, QueryConfig};
use axon_core::constants::MAX_QUERY_LENGTH;
use axon_core::errors::{AxonError, AxonResult, CacheError, QueryError};
use axon_core::models::stats::SystemStats;
use axon_core::models::{
    DiscoveryMethod, Edge, EdgeKind, FailureDetails, Node, NodeKind, NodeSnapshot, PipelineStage,
    QueryOptions, QueryResponse, RankedResult, RankingStrategy, SystemImage,
};
use axon_core::traits::{AttentionRefocuser, ContextBooster, SnapshotStore};
use axon_fusion::{Evidence, FusionEngine, Modality};
use axon_graph::GraphStore;
use axon_hebbian::HebbianLearner;
use axon_inhibition::{FailureLesson, InhibitorySystem};
use axon_observability::{QueryLog, QueryLogEntry};
use axon_temporal::BiTemporalModel;

use crate::collaborators::{PassthroughBooster, TopKAttention};
use crate::engines;
use crate::router::{route, QueryRoute};

pub struct QueryOrchestrator {
    store: GraphStore,
    activation: ActivationNetwork,
    activation_config: ActivationConfig,
    fusion: FusionEngine,
    hebbian: HebbianLearner,
    inhibition: InhibitorySystem,
    temporal: BiTemporalModel,
    cache: QueryCache,
    booster: Box<dyn ContextBooster>,
    attention: Box<dyn AttentionRefocuser>,
    pub(crate) config: QueryConfig,
    query_log: QueryLog,
    stage_failures: u64,
}

impl QueryOrchestrator {
    pub fn new(config: AxonConfig) -> Self {
        Self {
            store: GraphStore::new(),
            activation: ActivationNetwork::new(config.activation.clone()),
            activation_config: config.activation,
            fusion: FusionEngine::new(config.fusion),
            hebbian: HebbianLearner::new(config.hebbian),
            inhibition: InhibitorySystem::new(config.inhibition),
            temporal: BiTemporalModel::with_config(config.temporal),
            cache: QueryCache::new(config.cache),
            booster: Box::new(PassthroughBooster),
            attention: Box::new(TopKAttention),
            config: config.query,
            query_log: QueryLog::new(),
            stage_failures: 0,
        }
    }

    /// Plug in a real hierarchical-context collaborator.
    pub fn with_booster(mut self, booster: Box<dyn ContextBooster>) -> Self {
        self.booster = booster;
        self
    }

    /// Plug in a real attention collaborator.
    pub fn with_attention(mut self, attention: Box<dyn AttentionRefocuser>) -> Self {
        self.attention = attention;
        self
    }

    // --- Ingestion (scanners own id stability) ---

    pub fn add_node(&mut self, node: Node) {
        self.store.add_node(node);
    }

    pub fn add_edge(&mut self, edge: Edge) -> AxonResult<()> {
        self.store.add_edge(edge)?;
        Ok(())
    }

    /// Tell the cache these paths changed. Learning tables are left
    /// untouched; the maintenance sweep handles removed-node hygiene.
    pub fn notify_paths_changed(&mut self, paths: &[String]) -> usize {
        self.cache.invalidate(Some(paths))
    }

    // --- Subsystem access ---

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut GraphStore {
        &mut self.store
    }

    pub fn temporal(&self) -> &BiTemporalModel {
        &self.temporal
    }

    pub fn temporal_mut(&mut self) -> &mut BiTemporalModel {
        &mut self.temporal
    }

    pub fn hebbian(&self) -> &HebbianLearner {
        &self.hebbian
    }

    pub fn inhibition(&self) -> &InhibitorySystem {
        &self.inhibition
    }

    pub fn fusion(&self) -> &FusionEngine {
        &self.fusion
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn query_log(&self) -> &QueryLog {
        &self.query_log
    }

    // --- The pipeline ---

    /// Answer one query. See `PipelineStage::ORDER` for the stage
    /// contract; each stage consumes the mutated output of the one
    /// before it.
    pub fn query(&mut self, text: &str, options: &QueryOptions) -> AxonResult<QueryResponse> {
        let started = Instant::now();
        let text = text.trim();
        if text.is_empty() {
            return Err(QueryError::EmptyQuery.into());
        }
        if text.len() > MAX_QUERY_LENGTH {
            return Err(QueryError::QueryTooLong {
                len: text.len(),
                max: MAX_QUERY_LENGTH,
            }
            .into());
        }
        options.validate().map_err(AxonError::from)?;

        // Stages 1–2: literal fast path, then syntax routing.
        match route(text) {
            QueryRoute::LiteralPath => {
                if let Some(mut response) = engines::literal::resolve(&self.store, text) {
                    response.query_time_ms = started.elapsed().as_millis() as u64;
                    self.log_query(text, "literal", &response);
                    return Ok(response);
                }
                // Path not in the graph: fall through to the pipeline.
            }
            QueryRoute::GraphPattern => {
                if let Some(mut response) = engines::pattern::run(&self.store, text) {
                    response.query_time_ms = started.elapsed().as_millis() as u64;
                    self.log_query(text, "graph_pattern", &response);
                    return Ok(response);
                }
            }
            QueryRoute::Temporal => {
                if let Some(mut response) = engines::temporal::run(&self.temporal, text) {
                    response.query_time_ms = started.elapsed().as_millis() as u64;
                    self.log_query(text, "temporal", &response);
                    return Ok(response);
                }
            }
            QueryRoute::Aggregate => {
                let mut response = engines::aggregate::run(&self.store, text);
                response.query_time_ms = started.elapsed().as_millis() as u64;
                self.log_query(text, "aggregate", &response);
                return Ok(response);
            }
            QueryRoute::Standard => {}
        }

        // Stage 3: cache lookup. A corrupted cache is a hard failure.
        let key = CacheKey::compute(text, options);
        if !PipelineStage::CacheLookup.bypassed_by(options) {
            match self.cache.get(&key) {
                Ok(Some(mut response)) => {
                    response.cache_hit = true;
                    response.query_time_ms = started.elapsed().as_millis() as u64;
                    self.log_query(text, "pipeline", &response);
                    return Ok(response);
                }
                Ok(None) => {}
                Err(e) => {
                    return Err(QueryError::CacheCorrupted {
                        reason: e.to_string(),
                    }
                    .into());
                }
            }
        }

        // Stage 4: candidate ranking. Failure here is a HardFailure.
        let candidates = self.rank(text, options)?;
        let total_matches = candidates.len();
        let mut results = self.materialize(candidates);

        // Stage 5: inhibitory suppression.
        if !PipelineStage::Inhibition.bypassed_by(options) {
            let outcome = self.inhibition.apply_inhibition(results, text, None);
            debug!(
                inhibition_score = outcome.inhibition_score,
                original = outcome.original_count,
                removed = outcome.removed_count,
                "inhibition applied"
            );
            results = outcome.results;
        }

        // Stage 6: hierarchical-context boost (collaborator, best-effort).
        if !PipelineStage::ContextBoost.bypassed_by(options) {
            let backup = results.clone();
            match self.booster.boost(results, options.context_level) {
                Ok(boosted) => results = boosted,
                Err(e) => {
                    self.note_stage_failure(PipelineStage::ContextBoost, &e);
                    results = backup;
                }
            }
        }

        // Stage 7: attention refocus/truncate (collaborator, best-effort).
        if !PipelineStage::Attention.bypassed_by(options) {
            let backup = results.clone();
            match self.attention.refocus(results, options.limit) {
                Ok(refocused) => results = refocused,
                Err(e) => {
                    self.note_stage_failure(PipelineStage::Attention, &e);
                    results = backup;
                }
            }
        }

        // Stage 8: bi-temporal annotation plus opportunistic edges.
        if !PipelineStage::BiTemporal.bypassed_by(options) {
            self.annotate_results(&mut results, text, options);
        }

        // Stage 9: Hebbian co-activation over the finalized set.
        if !PipelineStage::HebbianRecording.bypassed_by(options) && results.len() > 1 {
            let primary = results[0].node.id.clone();
            let co_activated: Vec<String> =
                results[1..].iter().map(|r| r.node.id.clone()).collect();
            self.hebbian.record_co_activation(
                &primary,
                &co_activated,
                text,
                self.config.hebbian_base_strength,
            );
        }

        // Stage 10: fusion re-scoring and re-sort.
        if !PipelineStage::Fusion.bypassed_by(options) {
            self.fuse_results(&mut results);
        }

        let mut response = QueryResponse {
            results,
            total_matches,
            query_time_ms: started.elapsed().as_millis() as u64,
            cache_hit: false,
            temporal_data: None,
            aggregate_data: None,
        };

        // Stage 11: cache store. Oversize results simply go uncached;
        // a poisoned cache is the same hard failure as at lookup.
        if !PipelineStage::CacheStore.bypassed_by(options) {
            let paths = response.touched_paths();
            match self.cache.insert(key, &response, paths) {
                Ok(()) => {}
                Err(CacheError::Poisoned) => {
                    return Err(QueryError::CacheCorrupted {
                        reason: CacheError::Poisoned.to_string(),
                    }
                    .into());
                }
                Err(e) => debug!(error = %e, "result not cached"),
            }
        }

        response.query_time_ms = started.elapsed().as_millis() as u64;
        self.log_query(text, "pipeline", &response);
        Ok(response)
    }

    /// Stage 4. Scanners own edge weights, so a poisoned weight (NaN or
    /// infinity) can drive accumulated activation non-finite; that makes
    /// every downstream comparison meaningless and is the pipeline's
    /// hard ranking failure.
    fn rank(&self, text: &str, options: &QueryOptions) -> AxonResult<Vec<Candidate>> {
        let candidates = match options.ranking {
            RankingStrategy::Activation => {
                self.activation
                    .rank_query(&self.store, text, options.activation_levels)
            }
            RankingStrategy::Linear => linear_rank(&self.store, text, &self.activation_config),
        };
        if let Some(bad) = candidates
            .iter()
            .find(|c| !c.activation.is_finite() || !c.score.is_finite())
        {
            return Err(QueryError::RankingFailed {
                reason: format!(
                    "non-finite activation for node {}; check ingested edge weights",
                    bad.node_id
                ),
            }
            .into());
        }
        Ok(candidates)
    }

    /// Turn ranker candidates into result rows, dropping nodes that
    /// vanished between propagation and projection.
    fn materialize(&self, candidates: Vec<Candidate>) -> Vec<RankedResult> {
        candidates
            .into_iter()
            .filter_map(|c| {
                let node = self.store.node(&c.node_id)?;
                Some(RankedResult {
                    node: NodeSnapshot {
                        id: node.id.clone(),
                        name: node.name.clone(),
                        path: node.path.clone(),
                        kind: node.kind,
                    },
                    confidence: c.score,
                    activation: c.activation,
                    annotation: None,
                })
            })
            .collect()
    }

    fn annotate_results(
        &mut self,
        results: &mut [RankedResult],
        query: &str,
        options: &QueryOptions,
    ) {
        let query_time = options.valid_at.unwrap_or_else(Utc::now);
        let ids: Vec<String> = results.iter().map(|r| r.node.id.clone()).collect();
        let annotations = self
            .temporal
            .annotate(&ids, query_time, options.include_history);
        for (result, annotation) in results.iter_mut().zip(annotations) {
            result.annotation = Some(annotation);
        }

        // Co-occurring high-confidence results grow a relates_to edge.
        let cap = self
            .temporal
            .config()
            .co_occurrence_pair_cap
            .min(results.len());
        let threshold = self.temporal.config().co_occurrence_confidence;
        for i in 0..cap {
            for j in (i + 1)..cap {
                let (a, b) = (&results[i], &results[j]);
                if a.confidence > threshold
                    && b.confidence > threshold
                    && !self.temporal.has_active_link(&a.node.id, &b.node.id)
                {
                    self.temporal.create_edge(
                        a.node.id.clone(),
                        b.node.id.clone(),
                        EdgeKind::RelatesTo,
                        query_time,
                        vec![format!("co-occurred in results for \"{query}\"")],
                        DiscoveryMethod::CoOccurrence,
                    );
                }
            }
        }
    }

    /// Recompute each displayed confidence from accumulated evidence and
    /// re-sort by the fused value.
    ///
    /// The pipeline's running confidence (carrying inhibition penalties
    /// and context boosts from stages 5–7) is itself a modality, so the
    /// earlier stages' adjustments survive the re-scoring.
    fn fuse_results(&self, results: &mut Vec<RankedResult>) {
        let primary = results.first().map(|r| r.node.id.clone());
        for result in results.iter_mut() {
            let stored = self
                .store
                .node(&result.node.id)
                .map(|n| n.confidence.value())
                .unwrap_or(result.confidence);
            let mut evidence = vec![
                Evidence::new(Modality::Context, result.confidence.min(1.0), 1.0, 0.1),
                Evidence::new(Modality::Graph, stored, 0.6, 0.1),
                Evidence::new(Modality::Activation, result.activation.min(1.0), 0.8, 0.2),
            ];
            if let Some(primary_id) = &primary {
                if primary_id != &result.node.id {
                    if let Some(strength) =
                        self.hebbian.strength_between(primary_id, &result.node.id)
                    {
                        evidence.push(Evidence::new(Modality::Association, strength, 0.5, 0.3));
                    }
                }
            }
            result.confidence = self.fusion.fuse(&evidence).final_confidence;
        }
        results.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.node.id.cmp(&b.node.id))
        });
    }

    fn note_stage_failure(&mut self, stage: PipelineStage, error: &AxonError) {
        self.stage_failures += 1;
        warn!(stage = %stage, error = %error, "auxiliary stage failed; continuing with prior results");
    }

    pub fn stage_failure_count(&self) -> u64 {
        self.stage_failures
    }

    fn log_query(&mut self, text: &str, route: &str, response: &QueryResponse) {
        self.query_log.record(QueryLogEntry::new(
            text,
            route,
            response.query_time_ms,
            response.results.len(),
            response.cache_hit,
            self.stage_failures as usize,
        ));
    }

    // --- Learning entry points ---

    /// Record a task failure. Reinforces (or creates) the inhibitory
    /// pattern; once the same failure has recurred past the configured
    /// threshold, a `pattern` node is spawned in the graph.
    pub fn learn_from_failure(
        &mut self,
        task: &str,
        failure: &FailureDetails,
        files: &[String],
        context: Option<&str>,
    ) -> FailureLesson {
        let lesson = self.inhibition.learn_from_failure(task, failure, files, context);
        if lesson.reinforcements == self.inhibition.config().pattern_node_threshold {
            let short = &lesson.fingerprint[..12.min(lesson.fingerprint.len())];
            let node = Node::new(
                format!("pattern:{short}"),
                NodeKind::Pattern,
                format!("recurring failure: {task}"),
            )
            .with_confidence(lesson.strength)
            .with_metadata("category", failure.category.clone().into())
            .with_metadata(
                "files",
                serde_json::Value::Array(
                    files.iter().cloned().map(serde_json::Value::String).collect(),
                ),
            );
            info!(pattern = %node.id, "failure pattern promoted to graph node");
            self.store.add_node(node);
        }
        lesson
    }

    /// Report a task outcome against a previously displayed confidence;
    /// feeds the fusion calibration table.
    pub fn record_task_outcome(&mut self, predicted_confidence: f64, confirmed: bool) {
        self.fusion.record_outcome(predicted_confidence, confirmed);
    }

    // --- Stats & persistence ---

    pub fn system_stats(&self) -> SystemStats {
        SystemStats {
            graph: self.store.stats(),
            cache: self.cache.stats(),
            hebbian: self.hebbian.stats(),
            inhibition: self.inhibition.stats(),
            temporal: self.temporal.stats(),
        }
    }

    /// Export the graph and learning tables for persistence.
    pub fn export_image(&self) -> SystemImage {
        let (nodes, edges) = self.store.export();
        SystemImage {
            nodes,
            edges,
            connections: self.hebbian.export(),
            patterns: self.inhibition.export(),
            saved_at: Some(Utc::now()),
        }
    }

    /// Save to a snapshot store.
    pub fn save_to(&self, store: &dyn SnapshotStore) -> AxonResult<()> {
        store.save(&self.export_image())
    }

    /// Replay a persisted image through the public upsert APIs. Edges
    /// whose endpoints did not survive the snapshot are skipped with a
    /// warning rather than failing the whole load.
    pub fn load_from(&mut self, snapshot: &dyn SnapshotStore) -> AxonResult<()> {
        let image = snapshot.load()?;
        for node in image.nodes {
            self.store.add_node(node);
        }
        for edge in image.edges {
            let id = edge.id.clone();
            if let Err(e) = self.store.add_edge(edge) {
                warn!(edge = %id, error = %e, "skipping edge from snapshot");
            }
        }
        self.hebbian.restore(image.connections);
        self.inhibition.restore(image.patterns);
        info!(
            nodes = self.store.node_count(),
            edges = self.store.edge_count(),
            "system image loaded"
        );
        Ok(())
    }
}

impl Default for QueryOrchestrator {
    fn default() -> Self {
        Self::new(AxonConfig::default())
    }
}
