//! Value types shared across the workspace.

pub mod confidence;
pub mod edge;
pub mod hebbian;
pub mod inhibition;
pub mod node;
pub mod query;
pub mod snapshot;
pub mod stats;
pub mod temporal;

pub use confidence::Confidence;
pub use edge::{Edge, EdgeKind};
pub use hebbian::{HebbianConnection, PairKey};
pub use inhibition::{FailureDetails, InhibitoryPattern, TriggerSignature};
pub use node::{Node, NodeKind};
pub use query::{
    AggregateData, NodeSnapshot, PipelineStage, QueryOptions, QueryResponse, RankedResult,
    RankingStrategy, TemporalData,
};
pub use snapshot::SystemImage;
pub use stats::{
    CacheStats, GraphStats, HebbianStats, InhibitionStats, SystemStats, TemporalStats,
};
pub use temporal::{
    BiTemporalEdge, ContextWindow, DiscoveryMethod, NodeAnnotation, RelationshipSummary, Revision,
    TemporalQuery, TemporalQueryResult, TemporalSnapshot, TransactionTime, ValidInterval,
};
