//! FusionEngine: the fuse formula plus the calibration table behind one
//! interface. Fusing is pure; only outcome recording mutates state.

use std::sync::Mutex;

use tracing::debug;

use axon_core::config::FusionConfig;

use crate::calibration::{CalibrationBucket, CalibrationTable};
use crate::evidence::Evidence;
use crate::fuse::{fuse, FusionOutcome};

pub struct FusionEngine {
    config: FusionConfig,
    calibration: Mutex<CalibrationTable>,
}

impl FusionEngine {
    pub fn new(config: FusionConfig) -> Self {
        Self {
            config,
            calibration: Mutex::new(CalibrationTable::new()),
        }
    }

    /// Fuse evidence. Pure: repeated calls with the same input return
    /// the same outcome.
    pub fn fuse(&self, evidence: &[Evidence]) -> FusionOutcome {
        fuse(evidence, &self.config)
    }

    /// Record that a task outcome confirmed (or refuted) a past fused
    /// confidence.
    pub fn record_outcome(&self, predicted: f64, confirmed: bool) {
        if let Ok(mut table) = self.calibration.lock() {
            table.record(predicted, confirmed);
            debug!(predicted, confirmed, "calibration outcome recorded");
        }
    }

    /// Snapshot of the calibration table for external reporting.
    pub fn calibration_report(&self) -> Vec<((f64, f64), CalibrationBucket)> {
        self.calibration
            .lock()
            .map(|table| table.report())
            .unwrap_or_default()
    }

    pub fn calibration_samples(&self) -> u64 {
        self.calibration
            .lock()
            .map(|table| table.total_samples())
            .unwrap_or(0)
    }
}

impl Default for FusionEngine {
    fn default() -> Self {
        Self::new(FusionConfig::default())
    }
}
