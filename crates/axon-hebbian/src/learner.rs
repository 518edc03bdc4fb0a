//! The connection table and its reinforcement rule.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Mutex;
use tracing::trace;

use axon_core::config::HebbianConfig;
use axon_core::models::stats::HebbianStats;
use axon_core::models::{HebbianConnection, PairKey};

/// The Hebbian learner. Connections are unordered pairs; the table is
/// shared-read/sharded-write so queries keep reading while maintenance
/// sweeps run.
pub struct HebbianLearner {
    pub(crate) config: HebbianConfig,
    pub(crate) connections: DashMap<PairKey, HebbianConnection>,
    /// Transaction-time floor of the previous decay sweep.
    pub(crate) last_sweep: Mutex<DateTime<Utc>>,
}

impl HebbianLearner {
    pub fn new(config: HebbianConfig) -> Self {
        Self {
            config,
            connections: DashMap::new(),
            last_sweep: Mutex::new(Utc::now()),
        }
    }

    /// Record one co-activation event.
    ///
    /// Every pair `(primary, co)` is reinforced with the saturating rule
    /// `strength += learning_rate × signal × (1 − strength)`. Items
    /// earlier in `co_activated` reinforce more strongly: the signal for
    /// position `i` is `strength_signal / (1 + i)` (rank-position
    /// weighting of the finalized result order).
    pub fn record_co_activation(
        &self,
        primary: &str,
        co_activated: &[String],
        context: &str,
        strength_signal: f64,
    ) {
        let now = Utc::now();
        for (position, other) in co_activated.iter().enumerate() {
            if other == primary {
                continue;
            }
            let signal = (strength_signal / (1.0 + position as f64)).clamp(0.0, 1.0);
            let key = PairKey::new(primary, other.as_str());
            let mut connection = self
                .connections
                .entry(key.clone())
                .or_insert_with(|| HebbianConnection::new(key, now));
            connection.strength += self.config.learning_rate * signal
                * (1.0 - connection.strength);
            connection.strength = connection.strength.clamp(0.0, 1.0);
            connection.last_reinforced = now;
            connection.reinforcements += 1;
            connection.last_context = Some(context.to_string());
            trace!(
                pair = ?connection.key,
                strength = connection.strength,
                "connection reinforced"
            );
        }
    }

    /// Connections touching `node_id`, strongest first.
    pub fn connections_for(&self, node_id: &str) -> Vec<HebbianConnection> {
        let mut out: Vec<HebbianConnection> = self
            .connections
            .iter()
            .filter(|entry| entry.key().involves(node_id))
            .map(|entry| entry.value().clone())
            .collect();
        out.sort_by(|a, b| {
            b.strength
                .partial_cmp(&a.strength)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.key.cmp(&b.key))
        });
        out
    }

    /// Current strength between two nodes, if connected.
    pub fn strength_between(&self, a: &str, b: &str) -> Option<f64> {
        self.connections
            .get(&PairKey::new(a, b))
            .map(|c| c.strength)
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    pub fn stats(&self) -> HebbianStats {
        let mut distribution = [0usize; 10];
        let mut total_strength = 0.0;
        let mut count = 0usize;
        for entry in self.connections.iter() {
            let s = entry.value().strength;
            let bucket = ((s * 10.0) as usize).min(9);
            distribution[bucket] += 1;
            total_strength += s;
            count += 1;
        }
        HebbianStats {
            total_connections: count,
            average_strength: if count > 0 {
                total_strength / count as f64
            } else {
                0.0
            },
            strength_distribution: distribution,
        }
    }

    /// Restore connections from a persisted image (upsert by pair key).
    pub fn restore(&self, connections: Vec<HebbianConnection>) {
        for connection in connections {
            self.connections.insert(connection.key.clone(), connection);
        }
    }

    /// Clone out the table for persistence, in deterministic key order.
    pub fn export(&self) -> Vec<HebbianConnection> {
        let mut out: Vec<HebbianConnection> = self
            .connections
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        out.sort_by(|a, b| a.key.cmp(&b.key));
        out
    }
}

impl Default for HebbianLearner {
    fn default() -> Self {
        Self::new(HebbianConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reinforcement_saturates_toward_one() {
        let learner = HebbianLearner::default();
        let co = vec!["b".to_string()];
        let mut previous = 0.0;
        for _ in 0..200 {
            learner.record_co_activation("a", &co, "test", 1.0);
            let strength = learner.strength_between("a", "b").unwrap();
            assert!(strength >= previous);
            assert!(strength <= 1.0);
            previous = strength;
        }
        assert!(previous > 0.99);
    }

    #[test]
    fn earlier_positions_reinforce_more_strongly() {
        let learner = HebbianLearner::default();
        let co = vec!["first".to_string(), "second".to_string()];
        learner.record_co_activation("a", &co, "test", 1.0);
        let first = learner.strength_between("a", "first").unwrap();
        let second = learner.strength_between("a", "second").unwrap();
        assert!(first > second);
    }

    #[test]
    fn connection_is_symmetric() {
        let learner = HebbianLearner::default();
        learner.record_co_activation("a", &["b".to_string()], "test", 1.0);
        assert_eq!(
            learner.strength_between("a", "b"),
            learner.strength_between("b", "a")
        );
    }

    #[test]
    fn self_pairs_are_ignored() {
        let learner = HebbianLearner::default();
        learner.record_co_activation("a", &["a".to_string()], "test", 1.0);
        assert!(learner.is_empty());
    }

    #[test]
    fn connections_for_sorts_by_strength() {
        let learner = HebbianLearner::default();
        for _ in 0..5 {
            learner.record_co_activation("a", &["strong".to_string()], "test", 1.0);
        }
        learner.record_co_activation("a", &["weak".to_string()], "test", 0.2);
        let connections = learner.connections_for("a");
        assert_eq!(connections.len(), 2);
        assert!(connections[0].key.involves("strong"));
    }
}
