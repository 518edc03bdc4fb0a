//! # axon-observability
//!
//! Structured-tracing initialization, health evaluation over the
//! aggregated system stats, and a bounded query performance log.

pub mod health;
pub mod query_log;
pub mod tracing_setup;

pub use health::{evaluate, HealthReport, HealthStatus};
pub use query_log::{QueryLog, QueryLogEntry};
