//! Error taxonomy for the axon workspace.
//!
//! Each subsystem has its own error enum; `AxonError` is the top-level
//! union used at the orchestration boundary.

mod cache_error;
mod graph_error;
mod query_error;
mod storage_error;
mod temporal_error;

pub use cache_error::CacheError;
pub use graph_error::GraphError;
pub use query_error::QueryError;
pub use storage_error::StorageError;
pub use temporal_error::TemporalError;

/// Top-level error type for the axon system.
#[derive(Debug, thiserror::Error)]
pub enum AxonError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Temporal(#[from] TemporalError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("configuration error: {reason}")]
    Config { reason: String },
}

/// Result alias used across the workspace.
pub type AxonResult<T> = Result<T, AxonError>;
