//! # axon-query
//!
//! The QueryOrchestrator: one ordered, reproducible pipeline per query.
//! Literal paths short-circuit, specialized syntax routes to the temporal
//! or aggregate engine, and everything else runs the eleven-stage
//! retrieval pipeline with per-stage bypass flags and best-effort
//! auxiliary stages.

mod analysis;
mod collaborators;
mod engines;
mod maintenance;
mod orchestrator;
mod router;

pub use analysis::AnalysisReport;
pub use collaborators::{PassthroughBooster, TopKAttention};
pub use maintenance::MaintenanceReport;
pub use orchestrator::QueryOrchestrator;
pub use router::{route, QueryRoute};
