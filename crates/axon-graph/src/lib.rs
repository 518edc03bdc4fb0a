//! # axon-graph
//!
//! The GraphStore: slot-arena storage for nodes and edges addressed by
//! stable string ids mapped to dense indices. Edges reference nodes by id,
//! never by owning pointers, so dependency cycles and mutual `relates_to`
//! loops need no special handling. Removing a node leaves its edges behind
//! as dangling records; every reader filters them lazily.

mod store;
mod view;

pub use store::{EdgeHandle, GraphStore, NodeHandle};
pub use view::NeighborLink;
