//! Per-subsystem configuration with a single defaults module.
//!
//! Every hand-tuned constant in the retrieval pipeline (decay rates,
//! penalty weights, the score combination weights) lives here so it can be
//! overridden from a TOML file instead of being buried in the algorithms.

pub mod defaults;

mod activation_config;
mod cache_config;
mod fusion_config;
mod hebbian_config;
mod inhibition_config;
mod query_config;
mod storage_config;
mod temporal_config;

pub use activation_config::ActivationConfig;
pub use cache_config::CacheConfig;
pub use fusion_config::FusionConfig;
pub use hebbian_config::HebbianConfig;
pub use inhibition_config::InhibitionConfig;
pub use query_config::QueryConfig;
pub use storage_config::StorageConfig;
pub use temporal_config::TemporalConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{AxonError, AxonResult};

/// Umbrella configuration for the whole system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AxonConfig {
    pub activation: ActivationConfig,
    pub fusion: FusionConfig,
    pub hebbian: HebbianConfig,
    pub inhibition: InhibitionConfig,
    pub temporal: TemporalConfig,
    pub cache: CacheConfig,
    pub query: QueryConfig,
    pub storage: StorageConfig,
}

impl AxonConfig {
    /// Parse a configuration from TOML text. Missing sections and fields
    /// fall back to defaults.
    pub fn from_toml(text: &str) -> AxonResult<Self> {
        toml::from_str(text).map_err(|e| AxonError::Config {
            reason: e.to_string(),
        })
    }

    /// Load a configuration from a TOML file on disk.
    pub fn from_file(path: &std::path::Path) -> AxonResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AxonError::Config {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_toml(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = AxonConfig::from_toml("").unwrap();
        assert_eq!(cfg.activation.default_levels, 3);
        assert_eq!(cfg.query.default_limit, 10);
    }

    #[test]
    fn partial_section_overrides_one_field() {
        let cfg = AxonConfig::from_toml("[hebbian]\nlearning_rate = 0.2\n").unwrap();
        assert_eq!(cfg.hebbian.learning_rate, 0.2);
        assert_eq!(cfg.hebbian.decay_rate, defaults::DEFAULT_HEBBIAN_DECAY_RATE);
    }

    #[test]
    fn temporal_section_is_part_of_the_surface() {
        let cfg = AxonConfig::from_toml("[temporal]\nco_occurrence_confidence = 0.9\n").unwrap();
        assert_eq!(cfg.temporal.co_occurrence_confidence, 0.9);
        assert_eq!(
            cfg.temporal.max_snapshots,
            defaults::DEFAULT_MAX_TEMPORAL_SNAPSHOTS
        );
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        assert!(AxonConfig::from_toml("[[broken").is_err());
    }
}
