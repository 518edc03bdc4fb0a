//! # axon-temporal
//!
//! The bi-temporal layer over relationships: valid time (when a fact was
//! true in the project) is tracked separately from transaction time (when
//! the system learned it), with an append-only revision trail per edge,
//! named context windows for grouping changes, and immutable snapshots.

mod annotate;
mod model;
mod query;
mod snapshot;

pub use model::BiTemporalModel;
