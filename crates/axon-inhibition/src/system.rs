//! The inhibitory pattern table: learning from failure, suppressing
//! lookalike results, decaying stale patterns.

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Mutex;
use tracing::{debug, info};

use axon_core::config::InhibitionConfig;
use axon_core::models::inhibition::tokenize;
use axon_core::models::stats::InhibitionStats;
use axon_core::models::{FailureDetails, InhibitoryPattern, RankedResult, TriggerSignature};

use crate::similarity::signature_similarity;

/// What a `learn_from_failure` call produced.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureLesson {
    pub fingerprint: String,
    pub strength: f64,
    pub reinforcements: u64,
}

/// Result of an inhibition pass, with observability counters.
#[derive(Debug, Clone)]
pub struct InhibitionOutcome {
    pub results: Vec<RankedResult>,
    /// Total confidence mass subtracted across all candidates.
    pub inhibition_score: f64,
    pub original_count: usize,
    /// Candidates whose confidence was reduced (including removals).
    pub inhibited_count: usize,
    /// Candidates removed for falling below the confidence floor.
    pub removed_count: usize,
}

/// The inhibitory system.
pub struct InhibitorySystem {
    config: InhibitionConfig,
    patterns: DashMap<String, InhibitoryPattern>,
    last_sweep: Mutex<DateTime<Utc>>,
}

impl InhibitorySystem {
    pub fn new(config: InhibitionConfig) -> Self {
        Self {
            config,
            patterns: DashMap::new(),
            last_sweep: Mutex::new(Utc::now()),
        }
    }

    /// Learn from a task failure: derive the trigger signature and create
    /// or reinforce its pattern. Reinforcement saturates toward 1.0.
    pub fn learn_from_failure(
        &self,
        task: &str,
        failure: &FailureDetails,
        files: &[String],
        context: Option<&str>,
    ) -> FailureLesson {
        let task_text = match context {
            Some(ctx) => format!("{task} {ctx}"),
            None => task.to_string(),
        };
        let signature = TriggerSignature::from_failure(&task_text, &failure.category, files);
        let fingerprint = signature.fingerprint();
        let now = Utc::now();

        let lesson = match self.patterns.entry(fingerprint) {
            Entry::Occupied(mut occupied) => {
                let pattern = occupied.get_mut();
                pattern.strength += self.config.reinforcement_rate * (1.0 - pattern.strength);
                pattern.strength = pattern.strength.min(1.0);
                pattern.reinforcements += 1;
                pattern.last_reinforced = now;
                FailureLesson {
                    fingerprint: pattern.fingerprint.clone(),
                    strength: pattern.strength,
                    reinforcements: pattern.reinforcements,
                }
            }
            Entry::Vacant(vacant) => {
                let pattern =
                    InhibitoryPattern::new(signature, self.config.initial_strength, now);
                let lesson = FailureLesson {
                    fingerprint: pattern.fingerprint.clone(),
                    strength: pattern.strength,
                    reinforcements: pattern.reinforcements,
                };
                vacant.insert(pattern);
                lesson
            }
        };

        info!(
            fingerprint = %lesson.fingerprint,
            strength = lesson.strength,
            reinforcements = lesson.reinforcements,
            category = %failure.category,
            "failure pattern learned"
        );
        lesson
    }

    /// Suppress candidates that resemble known failures.
    ///
    /// For each candidate, every pattern contributes
    /// `strength × similarity` of confidence penalty; candidates whose
    /// remaining confidence drops below the floor are removed entirely.
    pub fn apply_inhibition(
        &self,
        results: Vec<RankedResult>,
        query: &str,
        context: Option<&str>,
    ) -> InhibitionOutcome {
        let query_text = match context {
            Some(ctx) => format!("{query} {ctx}"),
            None => query.to_string(),
        };
        let query_tokens = tokenize(&query_text);
        let original_count = results.len();

        let mut kept = Vec::with_capacity(results.len());
        let mut inhibition_score = 0.0;
        let mut inhibited_count = 0usize;
        let mut removed_count = 0usize;

        for mut result in results {
            let mut penalty = 0.0;
            for entry in self.patterns.iter() {
                let similarity = signature_similarity(
                    &entry.value().signature,
                    &query_tokens,
                    result.node.path.as_deref(),
                );
                penalty += entry.value().strength * similarity;
            }

            if penalty > 0.0 {
                inhibited_count += 1;
                let applied = penalty.min(result.confidence);
                inhibition_score += applied;
                result.confidence -= applied;
                if result.confidence < self.config.confidence_floor {
                    removed_count += 1;
                    debug!(node = %result.node.id, penalty, "candidate suppressed");
                    continue;
                }
            }
            kept.push(result);
        }

        InhibitionOutcome {
            results: kept,
            inhibition_score,
            original_count,
            inhibited_count,
            removed_count,
        }
    }

    /// Decay unreinforced patterns and prune what has faded out. Mirrors
    /// the Hebbian sweep; pattern tables stay small enough to walk
    /// serially.
    pub fn decay(&self) -> (usize, usize) {
        let cutoff = {
            let now = Utc::now();
            match self.last_sweep.lock() {
                Ok(mut guard) => std::mem::replace(&mut *guard, now),
                Err(_) => now,
            }
        };

        let mut decayed = 0usize;
        for mut entry in self.patterns.iter_mut() {
            if entry.last_reinforced < cutoff {
                entry.strength *= 1.0 - self.config.decay_rate;
                decayed += 1;
            }
        }

        // Patterns fade out well below the suppression floor.
        let prune_floor = self.config.confidence_floor * 0.2;
        let prune: Vec<String> = self
            .patterns
            .iter()
            .filter(|e| e.strength < prune_floor)
            .map(|e| e.fingerprint.clone())
            .collect();
        for fingerprint in &prune {
            self.patterns.remove(fingerprint);
        }

        info!(decayed, pruned = prune.len(), "inhibitory decay sweep complete");
        (decayed, prune.len())
    }

    pub fn config(&self) -> &InhibitionConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn stats(&self) -> InhibitionStats {
        let mut total = 0.0;
        let mut count = 0usize;
        let mut strongest: Option<(String, f64)> = None;
        for entry in self.patterns.iter() {
            total += entry.strength;
            count += 1;
            let is_stronger = strongest.as_ref().map_or(true, |(_, s)| entry.strength > *s);
            if is_stronger {
                strongest = Some((entry.fingerprint.clone(), entry.strength));
            }
        }
        InhibitionStats {
            total_patterns: count,
            average_strength: if count > 0 { total / count as f64 } else { 0.0 },
            strongest: strongest.map(|(fp, _)| fp),
        }
    }

    /// Restore patterns from a persisted image.
    pub fn restore(&self, patterns: Vec<InhibitoryPattern>) {
        for pattern in patterns {
            self.patterns.insert(pattern.fingerprint.clone(), pattern);
        }
    }

    /// Clone out the table for persistence, in fingerprint order.
    pub fn export(&self) -> Vec<InhibitoryPattern> {
        let mut out: Vec<InhibitoryPattern> =
            self.patterns.iter().map(|e| e.value().clone()).collect();
        out.sort_by(|a, b| a.fingerprint.cmp(&b.fingerprint));
        out
    }
}

impl Default for InhibitorySystem {
    fn default() -> Self {
        Self::new(InhibitionConfig::default())
    }
}
