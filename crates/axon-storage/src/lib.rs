//! # axon-storage
//!
//! Durable snapshots of the graph plus learning tables, behind the
//! `SnapshotStore` trait. The format (a small SQLite schema with JSON
//! payload columns) belongs to this crate alone; callers only exchange
//! `SystemImage` values.

mod schema;
mod store;

pub use store::SqliteSnapshotStore;
