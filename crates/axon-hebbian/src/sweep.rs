//! Out-of-band decay sweep.

use chrono::Utc;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

use axon_core::models::PairKey;

use crate::learner::HebbianLearner;

/// What one decay sweep did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecaySweepReport {
    pub decayed: usize,
    pub pruned: usize,
    pub remaining: usize,
}

impl HebbianLearner {
    /// Decay every connection not reinforced since the previous sweep by
    /// `(1 − decay_rate)` and prune those below epsilon. Runs over DashMap
    /// shards in parallel; concurrent readers are never blocked for the
    /// whole sweep.
    pub fn decay(&self) -> DecaySweepReport {
        let cutoff = {
            let now = Utc::now();
            match self.last_sweep.lock() {
                Ok(mut guard) => std::mem::replace(&mut *guard, now),
                Err(_) => now,
            }
        };

        let keys: Vec<PairKey> = self
            .connections
            .iter()
            .map(|entry| entry.key().clone())
            .collect();

        let decayed = AtomicUsize::new(0);
        let prune: Vec<PairKey> = keys
            .par_iter()
            .filter_map(|key| {
                let mut below_epsilon = false;
                if let Some(mut connection) = self.connections.get_mut(key) {
                    if connection.last_reinforced < cutoff {
                        connection.strength *= 1.0 - self.config.decay_rate;
                        decayed.fetch_add(1, Ordering::Relaxed);
                    }
                    below_epsilon = connection.strength < self.config.prune_epsilon;
                }
                below_epsilon.then(|| key.clone())
            })
            .collect();

        for key in &prune {
            self.connections.remove(key);
        }

        let report = DecaySweepReport {
            decayed: decayed.load(Ordering::Relaxed),
            pruned: prune.len(),
            remaining: self.connections.len(),
        };
        info!(
            decayed = report.decayed,
            pruned = report.pruned,
            remaining = report.remaining,
            "hebbian decay sweep complete"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axon_core::config::HebbianConfig;

    #[test]
    fn unreinforced_connections_decay_and_never_grow() {
        let learner = HebbianLearner::default();
        learner.record_co_activation("a", &["b".to_string()], "test", 1.0);
        let before = learner.strength_between("a", "b").unwrap();

        let mut previous = before;
        for _ in 0..5 {
            learner.decay();
            let strength = learner.strength_between("a", "b").unwrap();
            assert!(strength <= previous);
            previous = strength;
        }
        assert!(previous < before);
    }

    #[test]
    fn weak_connections_are_pruned() {
        let learner = HebbianLearner::new(HebbianConfig {
            prune_epsilon: 0.5,
            decay_rate: 0.9,
            ..Default::default()
        });
        learner.record_co_activation("a", &["b".to_string()], "test", 1.0);
        let report = learner.decay();
        assert_eq!(report.pruned, 1);
        assert!(learner.strength_between("a", "b").is_none());
    }

    #[test]
    fn reinforced_connections_skip_one_decay_cycle() {
        let learner = HebbianLearner::default();
        // First sweep resets the cutoff to "now"...
        learner.decay();
        // ...so a reinforcement after it is younger than the next cutoff
        // check and must not decay.
        learner.record_co_activation("a", &["b".to_string()], "test", 1.0);
        let before = learner.strength_between("a", "b").unwrap();
        let report = learner.decay();
        assert_eq!(report.decayed, 0);
        assert_eq!(learner.strength_between("a", "b").unwrap(), before);
    }
}
