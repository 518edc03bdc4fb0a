use serde::{Deserialize, Serialize};

use super::defaults;

/// Snapshot persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database filename for the SQLite snapshot store.
    pub db_filename: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_filename: defaults::DEFAULT_DB_FILENAME.to_string(),
        }
    }
}
