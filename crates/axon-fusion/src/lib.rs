//! # axon-fusion
//!
//! Pure confidence fusion: combines evidence from several modalities into
//! one score plus an uncertainty estimate, flags cross-modality conflict,
//! and keeps a running calibration table that external reporting can read.

mod calibration;
mod engine;
mod evidence;
mod fuse;

pub use calibration::{CalibrationBucket, CalibrationTable};
pub use engine::FusionEngine;
pub use evidence::{Evidence, Modality, ModalityContribution};
pub use fuse::{fuse, FusionOutcome};
