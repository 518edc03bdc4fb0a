//! The SQLite-backed snapshot store.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use tracing::info;

use axon_core::errors::{AxonError, AxonResult, StorageError};
use axon_core::models::{Edge, HebbianConnection, InhibitoryPattern, Node, SystemImage};
use axon_core::traits::SnapshotStore;

use crate::schema;

/// Snapshot persistence on a single SQLite connection. Save replaces the
/// stored image wholesale inside one transaction; load reads it back.
pub struct SqliteSnapshotStore {
    conn: Mutex<Connection>,
}

fn sqlite_err(e: rusqlite::Error) -> AxonError {
    StorageError::Sqlite(e.to_string()).into()
}

impl SqliteSnapshotStore {
    /// Open (or create) a snapshot database on disk.
    pub fn open(path: &Path) -> AxonResult<Self> {
        let conn = Connection::open(path).map_err(sqlite_err)?;
        schema::initialize(&conn).map_err(sqlite_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory store (tests).
    pub fn open_in_memory() -> AxonResult<Self> {
        let conn = Connection::open_in_memory().map_err(sqlite_err)?;
        schema::initialize(&conn).map_err(sqlite_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&mut Connection) -> AxonResult<T>) -> AxonResult<T> {
        let mut guard = self.conn.lock().map_err(|_| {
            AxonError::from(StorageError::Corrupt {
                reason: "snapshot connection poisoned".to_string(),
            })
        })?;
        f(&mut guard)
    }
}

impl SnapshotStore for SqliteSnapshotStore {
    fn save(&self, image: &SystemImage) -> AxonResult<()> {
        self.with_conn(|conn| {
            let tx = conn.transaction().map_err(sqlite_err)?;

            for table in [
                "nodes",
                "edges",
                "hebbian_connections",
                "inhibitory_patterns",
                "snapshot_meta",
            ] {
                tx.execute(&format!("DELETE FROM {table}"), [])
                    .map_err(sqlite_err)?;
            }

            for node in &image.nodes {
                tx.execute(
                    "INSERT INTO nodes (id, payload) VALUES (?1, ?2)",
                    params![node.id, serde_json::to_string(node).map_err(StorageError::from)?],
                )
                .map_err(sqlite_err)?;
            }
            for edge in &image.edges {
                tx.execute(
                    "INSERT INTO edges (id, source, target, payload) VALUES (?1, ?2, ?3, ?4)",
                    params![
                        edge.id,
                        edge.source,
                        edge.target,
                        serde_json::to_string(edge).map_err(StorageError::from)?
                    ],
                )
                .map_err(sqlite_err)?;
            }
            for connection in &image.connections {
                tx.execute(
                    "INSERT INTO hebbian_connections (pair_a, pair_b, payload) VALUES (?1, ?2, ?3)",
                    params![
                        connection.key.a,
                        connection.key.b,
                        serde_json::to_string(connection).map_err(StorageError::from)?
                    ],
                )
                .map_err(sqlite_err)?;
            }
            for pattern in &image.patterns {
                tx.execute(
                    "INSERT INTO inhibitory_patterns (fingerprint, payload) VALUES (?1, ?2)",
                    params![
                        pattern.fingerprint,
                        serde_json::to_string(pattern).map_err(StorageError::from)?
                    ],
                )
                .map_err(sqlite_err)?;
            }

            let saved_at = image.saved_at.unwrap_or_else(Utc::now);
            tx.execute(
                "INSERT INTO snapshot_meta (key, value) VALUES ('saved_at', ?1)",
                params![saved_at.to_rfc3339()],
            )
            .map_err(sqlite_err)?;

            tx.commit().map_err(sqlite_err)?;
            info!(
                nodes = image.nodes.len(),
                edges = image.edges.len(),
                connections = image.connections.len(),
                patterns = image.patterns.len(),
                "system image saved"
            );
            Ok(())
        })
    }

    fn load(&self) -> AxonResult<SystemImage> {
        self.with_conn(|conn| {
            let nodes = read_payloads::<Node>(conn, "SELECT payload FROM nodes ORDER BY id")?;
            let edges = read_payloads::<Edge>(conn, "SELECT payload FROM edges ORDER BY id")?;
            let connections = read_payloads::<HebbianConnection>(
                conn,
                "SELECT payload FROM hebbian_connections ORDER BY pair_a, pair_b",
            )?;
            let patterns = read_payloads::<InhibitoryPattern>(
                conn,
                "SELECT payload FROM inhibitory_patterns ORDER BY fingerprint",
            )?;

            let saved_at: Option<String> = conn
                .query_row(
                    "SELECT value FROM snapshot_meta WHERE key = 'saved_at'",
                    [],
                    |row| row.get(0),
                )
                .ok();
            let saved_at = saved_at
                .as_deref()
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.with_timezone(&Utc));

            Ok(SystemImage {
                nodes,
                edges,
                connections,
                patterns,
                saved_at,
            })
        })
    }
}

fn read_payloads<T: serde::de::DeserializeOwned>(
    conn: &Connection,
    sql: &str,
) -> AxonResult<Vec<T>> {
    let mut stmt = conn.prepare(sql).map_err(sqlite_err)?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(sqlite_err)?;

    let mut out = Vec::new();
    for payload in rows {
        let payload = payload.map_err(sqlite_err)?;
        out.push(serde_json::from_str(&payload).map_err(StorageError::from)?);
    }
    Ok(out)
}
