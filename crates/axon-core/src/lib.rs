//! # axon-core
//!
//! Foundation crate for the axon knowledge graph system.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::AxonConfig;
pub use errors::{AxonError, AxonResult};
pub use models::confidence::Confidence;
pub use models::edge::{Edge, EdgeKind};
pub use models::node::{Node, NodeKind};
pub use models::query::{QueryOptions, QueryResponse, RankedResult};
