//! Table setup.

use rusqlite::Connection;

pub(crate) const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS nodes (
    id           TEXT PRIMARY KEY,
    payload      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS edges (
    id           TEXT PRIMARY KEY,
    source       TEXT NOT NULL,
    target       TEXT NOT NULL,
    payload      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS hebbian_connections (
    pair_a       TEXT NOT NULL,
    pair_b       TEXT NOT NULL,
    payload      TEXT NOT NULL,
    PRIMARY KEY (pair_a, pair_b)
);

CREATE TABLE IF NOT EXISTS inhibitory_patterns (
    fingerprint  TEXT PRIMARY KEY,
    payload      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS snapshot_meta (
    key          TEXT PRIMARY KEY,
    value        TEXT NOT NULL
);
";

pub(crate) fn initialize(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA)
}
