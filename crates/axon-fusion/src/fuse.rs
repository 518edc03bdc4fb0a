//! The fusion formula.

use serde::{Deserialize, Serialize};

use axon_core::config::FusionConfig;

use crate::evidence::{Evidence, ModalityContribution};

/// Result of fusing a set of evidence items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FusionOutcome {
    pub final_confidence: f64,
    pub uncertainty: f64,
    pub contributions: Vec<ModalityContribution>,
    /// Set when modality values disagreed beyond the variance threshold.
    pub conflict: bool,
}

impl FusionOutcome {
    fn empty() -> Self {
        Self {
            final_confidence: 0.0,
            uncertainty: 1.0,
            contributions: Vec::new(),
            conflict: false,
        }
    }
}

/// Fuse evidence into one confidence.
///
/// Each item's weight is discounted by `(1 − uncertainty)`; the fused
/// confidence is the discounted-weight mean of the values. When the
/// (unweighted) variance of the values exceeds the configured threshold,
/// the result takes a flat multiplicative conflict penalty and the
/// conflict flag is set.
///
/// Identity law: a single item with weight 1 and uncertainty 0 fuses to
/// exactly its value (variance is zero, so no penalty can apply).
pub fn fuse(evidence: &[Evidence], config: &FusionConfig) -> FusionOutcome {
    if evidence.is_empty() {
        return FusionOutcome::empty();
    }

    let total_effective: f64 = evidence.iter().map(Evidence::effective_weight).sum();
    if total_effective <= 0.0 {
        // Every item was fully uncertain; there is nothing to average.
        return FusionOutcome::empty();
    }

    let weighted_sum: f64 = evidence
        .iter()
        .map(|e| e.value * e.effective_weight())
        .sum();
    let mut final_confidence = weighted_sum / total_effective;

    let mean = evidence.iter().map(|e| e.value).sum::<f64>() / evidence.len() as f64;
    let variance = evidence
        .iter()
        .map(|e| (e.value - mean).powi(2))
        .sum::<f64>()
        / evidence.len() as f64;

    let conflict = evidence.len() > 1 && variance > config.conflict_variance_threshold;
    if conflict {
        final_confidence *= 1.0 - config.conflict_penalty;
    }

    // Combined uncertainty: raw-weight mean of the item uncertainties,
    // widened by value dispersion.
    let total_weight: f64 = evidence.iter().map(|e| e.weight).sum();
    let mean_uncertainty = if total_weight > 0.0 {
        evidence
            .iter()
            .map(|e| e.uncertainty * e.weight)
            .sum::<f64>()
            / total_weight
    } else {
        1.0
    };
    let uncertainty = (mean_uncertainty + variance.sqrt() * 0.5).clamp(0.0, 1.0);

    let contributions = evidence
        .iter()
        .map(|e| ModalityContribution {
            modality: e.modality,
            value: e.value,
            effective_weight: e.effective_weight(),
            share: e.effective_weight() / total_effective,
        })
        .collect();

    FusionOutcome {
        final_confidence: final_confidence.clamp(0.0, 1.0),
        uncertainty,
        contributions,
        conflict,
    }
}
