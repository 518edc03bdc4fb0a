use serde::{Deserialize, Serialize};

/// Where a piece of evidence came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    /// Stored node confidence from the graph.
    Graph,
    /// Accumulated spreading activation.
    Activation,
    /// Hebbian association strength.
    Association,
    /// Hierarchical context boost.
    Context,
    /// Anything a collaborator injects.
    External,
}

impl Modality {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Graph => "graph",
            Self::Activation => "activation",
            Self::Association => "association",
            Self::Context => "context",
            Self::External => "external",
        }
    }
}

/// One evidence item. All three numeric fields are clamped to [0, 1]
/// at construction except `weight`, which is only floored at zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub modality: Modality,
    pub value: f64,
    pub weight: f64,
    pub uncertainty: f64,
}

impl Evidence {
    pub fn new(modality: Modality, value: f64, weight: f64, uncertainty: f64) -> Self {
        Self {
            modality,
            value: value.clamp(0.0, 1.0),
            weight: weight.max(0.0),
            uncertainty: uncertainty.clamp(0.0, 1.0),
        }
    }

    /// Weight after uncertainty discounting.
    pub fn effective_weight(&self) -> f64 {
        self.weight * (1.0 - self.uncertainty)
    }
}

/// Per-modality share of a fused confidence, for observability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModalityContribution {
    pub modality: Modality,
    pub value: f64,
    pub effective_weight: f64,
    /// Fraction of the total effective weight this item carried.
    pub share: f64,
}
