#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

use sqlx::sqlite;
use std::{str::FromStr, time::Duration};
use tokio::try_join;

pub mod config;
mod r#impl;
pub mod types;

use config::SqliteConfig;

/// The error type of every store operation.
pub use sqlx::Error;

/// SQLite database implementation of the catalog repositories.
///
/// This struct provides separate reader and writer connection pools to a SQLite database,
/// implementing the repository traits defined in `catalog-core`.
///
/// # Connection Management
///
/// - `reader`: A connection pool for read operations, allowing concurrent reads
/// - `writer`: A single-connection pool for write operations, ensuring serialized writes
///
/// # Example
///
/// ```no_run
/// # use catalog_sqlite::{Db, config::SqliteConfig};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = SqliteConfig::default();
/// let db = Db::open(&config).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Db {
    /// Connection pool for read operations
    pub reader: sqlx::Pool<sqlx::Sqlite>,
    /// Connection pool for write operations (limited to 1 connection)
    pub writer: sqlx::Pool<sqlx::Sqlite>,
}

impl Db {
    /// Open a connection to the specified SQLite database.
    ///
    /// Creates a new database if one doesn't exist (when `create_if_missing` is true)
    /// and applies all pending migrations. Either both pools are ready and the
    /// schema is current, or an error is returned; there is no partially
    /// initialised handle.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if:
    /// - The database file is missing and `create_if_missing` is false
    /// - Database connection fails
    /// - Migrations fail to apply
    pub async fn open(config: &SqliteConfig) -> Result<Self, sqlx::Error> {
        let db_path = config
            .database_path
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());

        let options =
            sqlite::SqliteConnectOptions::from_str(db_path.as_deref().unwrap_or(":memory:"))?
                .busy_timeout(Duration::from_secs(5))
                .foreign_keys(true)
                .journal_mode(sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlite::SqliteSynchronous::Normal)
                .pragma("journal_size_limit", "27103364")
                .pragma("mmap_size", "134217728")
                .pragma("temp_store", "memory")
                .create_if_missing(config.create_if_missing);

        // The writer connects first so a fresh file exists before any reader opens it.
        // Its one connection is never reaped: an in-memory database lives only as
        // long as some connection to it stays open.
        let writer = sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options.clone())
            .await?;

        let reader = sqlite::SqlitePoolOptions::new().connect_with(options);
        let migrations = async {
            sqlx::migrate!("./schema")
                .run(&writer)
                .await
                .map_err(sqlx::Error::from)
        };
        let (reader, ()) = try_join!(reader, migrations)?;

        Ok(Self { reader, writer })
    }
}
