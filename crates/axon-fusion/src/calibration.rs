//! Running calibration: predicted confidence vs observed task outcomes.

use serde::{Deserialize, Serialize};

use axon_core::constants::CALIBRATION_BUCKETS;

/// One 0.1-wide confidence range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationBucket {
    pub predictions: u64,
    pub confirmations: u64,
    pub predicted_sum: f64,
}

impl CalibrationBucket {
    /// Observed accuracy within the bucket, None before any samples.
    pub fn observed_accuracy(&self) -> Option<f64> {
        (self.predictions > 0).then(|| self.confirmations as f64 / self.predictions as f64)
    }

    /// Mean predicted confidence within the bucket.
    pub fn mean_predicted(&self) -> Option<f64> {
        (self.predictions > 0).then(|| self.predicted_sum / self.predictions as f64)
    }
}

/// Fixed-bucket calibration table. Updated whenever a later task outcome
/// confirms or refutes a past fused confidence; a well-calibrated system
/// shows observed accuracy tracking mean predicted confidence per bucket.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalibrationTable {
    buckets: [CalibrationBucket; CALIBRATION_BUCKETS],
}

impl CalibrationTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket_index(predicted: f64) -> usize {
        ((predicted.clamp(0.0, 1.0) * CALIBRATION_BUCKETS as f64) as usize)
            .min(CALIBRATION_BUCKETS - 1)
    }

    /// Record one outcome for a past prediction.
    pub fn record(&mut self, predicted: f64, confirmed: bool) {
        let bucket = &mut self.buckets[Self::bucket_index(predicted)];
        bucket.predictions += 1;
        bucket.predicted_sum += predicted.clamp(0.0, 1.0);
        if confirmed {
            bucket.confirmations += 1;
        }
    }

    /// The bucket covering `predicted`.
    pub fn bucket_for(&self, predicted: f64) -> &CalibrationBucket {
        &self.buckets[Self::bucket_index(predicted)]
    }

    /// All buckets with their ranges, for external calibration reporting.
    pub fn report(&self) -> Vec<((f64, f64), CalibrationBucket)> {
        self.buckets
            .iter()
            .enumerate()
            .map(|(i, b)| {
                let lo = i as f64 / CALIBRATION_BUCKETS as f64;
                let hi = (i + 1) as f64 / CALIBRATION_BUCKETS as f64;
                ((lo, hi), *b)
            })
            .collect()
    }

    pub fn total_samples(&self) -> u64 {
        self.buckets.iter().map(|b| b.predictions).sum()
    }
}
