use chrono::{DateTime, Utc};

/// Bi-temporal model errors.
#[derive(Debug, thiserror::Error)]
pub enum TemporalError {
    #[error("bi-temporal edge not found: {id}")]
    EdgeNotFound { id: String },

    #[error("invalid interval: start {start} is after end {end}")]
    InvalidInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error(
        "edge {edge_id} already invalidated at {existing}; cannot move the end back to {requested}"
    )]
    InconsistentInvalidation {
        edge_id: String,
        existing: DateTime<Utc>,
        requested: DateTime<Utc>,
    },

    #[error("context window not found: {name}")]
    WindowNotFound { name: String },
}
