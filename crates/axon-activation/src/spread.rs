//! Round-bounded breadth-first activation spreading.

use std::collections::HashMap;

use tracing::debug;

use axon_graph::GraphStore;

use crate::seeds::Seed;

/// Spread activation from `seeds` for up to `levels` rounds.
///
/// Each round, every node activated in the previous round pulses
/// `activation × edge.weight × edge.confidence × decay` to each live
/// neighbor (both edge directions); per-node activation accumulates
/// additively across rounds. Propagation stops early when the largest
/// pulse of a round falls below `epsilon`.
///
/// Termination is guaranteed by the round cap; cycles are safe because
/// only the previous round's pulse propagates, never the running total,
/// so no visited set is needed.
pub fn spread(
    store: &GraphStore,
    seeds: &[Seed],
    levels: usize,
    decay: f64,
    epsilon: f64,
) -> HashMap<String, f64> {
    let mut total: HashMap<String, f64> = HashMap::new();
    let mut pulse: HashMap<String, f64> = HashMap::new();

    for seed in seeds {
        *total.entry(seed.node_id.clone()).or_insert(0.0) += seed.score;
        *pulse.entry(seed.node_id.clone()).or_insert(0.0) += seed.score;
    }

    for round in 0..levels {
        // Iterate the pulse in id order: float accumulation is not
        // associative, and reproducible ranking needs a fixed order.
        let mut frontier: Vec<(&String, &f64)> = pulse.iter().collect();
        frontier.sort_by(|a, b| a.0.cmp(b.0));

        let mut next: HashMap<String, f64> = HashMap::new();
        for (node_id, activation) in frontier {
            for link in store.neighbors(node_id) {
                let contribution =
                    activation * link.edge.weight * link.edge.confidence.value() * decay;
                if contribution > 0.0 {
                    *next.entry(link.neighbor.id.clone()).or_insert(0.0) += contribution;
                }
            }
        }

        if next.is_empty() {
            break;
        }
        let max_pulse = next.values().copied().fold(0.0f64, f64::max);
        for (node_id, contribution) in &next {
            *total.entry(node_id.clone()).or_insert(0.0) += contribution;
        }
        pulse = next;

        if max_pulse < epsilon {
            debug!(round, max_pulse, "activation converged below epsilon");
            break;
        }
    }

    total
}
