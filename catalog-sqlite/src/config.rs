//! Configuration types for the SQLite store.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the catalog lives and how to open it.
///
/// # Examples
///
/// ```
/// use catalog_sqlite::config::SqliteConfig;
/// use std::path::PathBuf;
///
/// // In-memory database (default), gone when the process exits
/// let config = SqliteConfig::default();
///
/// // File-based database that must already exist
/// let config = SqliteConfig {
///     database_path: Some(PathBuf::from("catalog.db")),
///     create_if_missing: false,
/// };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SqliteConfig {
    /// Database file path. If None, uses an in-memory database
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    /// Whether to create the database file if it doesn't exist
    #[serde(default = "default_create_if_missing")]
    pub create_if_missing: bool,
}

fn default_create_if_missing() -> bool {
    true
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            create_if_missing: default_create_if_missing(),
        }
    }
}
