//! # SQLite Backend
//!
//! A [`KeyValueStore`] over a single SQLite table.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      SQLite Key-Value Store                             │
//! │                                                                         │
//! │  Terminal startup                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreConfig::new(path) ← Configure pool settings                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SqliteStore::open(config).await ← Create pool + run migrations        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────────────────────────────┐              │
//! │  │ kv_store                                             │              │
//! │  │  key (PK)          │ value (JSON)   │ updated_at     │              │
//! │  │  coffee_products   │ [{"id":"1",…}] │ 2024-06-15T…   │              │
//! │  │  coffee_sales      │ [{"id":…}]     │ 2024-06-15T…   │              │
//! │  │  coffee_discounts  │ [{"code":…}]   │ 2024-06-15T…   │              │
//! │  └──────────────────────────────────────────────────────┘              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! The journal runs in WAL mode with NORMAL synchronous. A batch written by
//! `set_many` is one transaction: after a crash either every key in it has
//! the new value or none has.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueStore;
use crate::migrations;

const UPSERT: &str = "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

// =============================================================================
// Configuration
// =============================================================================

/// Store configuration.
///
/// ## Example
/// ```rust
/// use brew_store::StoreConfig;
///
/// let config = StoreConfig::new("/tmp/brew.db")
///     .max_connections(2)
///     .run_migrations(true);
/// assert_eq!(config.max_connections, 2);
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 4 (one operator, one order at a time)
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection acquire timeout.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Option<Duration>,

    /// Whether to run migrations on open.
    /// Default: true
    pub run_migrations: bool,
}

impl StoreConfig {
    /// Creates a configuration for the database file at `path`. The file
    /// and its parent directories are created on open.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            database_path: path.into(),
            max_connections: 4,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)),
            run_migrations: true,
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// An in-memory database (for tests).
    ///
    /// The pool holds exactly one connection that never idles out, since
    /// the database disappears with its last connection.
    pub fn in_memory() -> Self {
        StoreConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: None,
            run_migrations: true,
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(":memory:")
    }
}

// =============================================================================
// SqliteStore
// =============================================================================

/// SQLite-backed key-value store.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if needed) the database and, if configured, applies
    /// pending migrations.
    pub async fn open(config: StoreConfig) -> StoreResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening key-value store"
        );

        let connect_options = if config.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
        } else {
            if let Some(parent) = config.database_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;
                }
            }
            SqliteConnectOptions::new()
                .filename(&config.database_path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
        };

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout);
        if config.is_in_memory() {
            pool_options = pool_options.max_lifetime(None::<Duration>);
        }

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        debug!(max_connections = config.max_connections, "Store pool created");

        let store = SqliteStore { pool };
        if config.run_migrations {
            store.run_migrations().await?;
        }

        Ok(store)
    }

    /// Opens a fresh in-memory store with the schema applied.
    pub async fn in_memory() -> StoreResult<Self> {
        SqliteStore::open(StoreConfig::in_memory()).await
    }

    /// Applies pending migrations. Idempotent.
    pub async fn run_migrations(&self) -> StoreResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// `(total, applied)` migration counts, for diagnostics.
    pub async fn migration_status(&self) -> StoreResult<(usize, usize)> {
        migrations::migration_status(&self.pool).await
    }

    /// Checks that the database answers queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Closes the pool. Later operations fail with `ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing key-value store");
        self.pool.close().await;
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        debug!(key, found = value.is_some(), "Store read");
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        sqlx::query(UPSERT)
            .bind(key)
            .bind(value)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await?;

        debug!(key, bytes = value.len(), "Store write");
        Ok(())
    }

    async fn set_many(&self, entries: &[(String, String)]) -> StoreResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::TransactionFailed(e.to_string()))?;

        let now = Utc::now().to_rfc3339();
        for (key, value) in entries {
            sqlx::query(UPSERT)
                .bind(key.as_str())
                .bind(value.as_str())
                .bind(now.as_str())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit()
            .await
            .map_err(|e| StoreError::TransactionFailed(e.to_string()))?;

        debug!(entries = entries.len(), "Store batch committed");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = SqliteStore::in_memory().await.unwrap();
        assert!(store.health_check().await);

        let (total, applied) = store.migration_status().await.unwrap();
        assert_eq!(total, applied);
    }

    #[tokio::test]
    async fn test_get_set_overwrite() {
        let store = SqliteStore::in_memory().await.unwrap();
        assert_eq!(store.get("coffee_sales").await.unwrap(), None);

        store.set("coffee_sales", "[]").await.unwrap();
        store.set("coffee_sales", "[1]").await.unwrap();
        assert_eq!(
            store.get("coffee_sales").await.unwrap().as_deref(),
            Some("[1]")
        );
    }

    #[tokio::test]
    async fn test_set_many() {
        let store = SqliteStore::in_memory().await.unwrap();
        store
            .set_many(&[
                ("coffee_products".to_string(), "[\"p\"]".to_string()),
                ("coffee_sales".to_string(), "[\"s\"]".to_string()),
            ])
            .await
            .unwrap();

        assert_eq!(
            store.get("coffee_products").await.unwrap().as_deref(),
            Some("[\"p\"]")
        );
        assert_eq!(
            store.get("coffee_sales").await.unwrap().as_deref(),
            Some("[\"s\"]")
        );
    }

    #[tokio::test]
    async fn test_closed_store_rejects_operations() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.close().await;
        assert!(!store.health_check().await);
        assert!(store.set("k", "v").await.is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::new("/tmp/brew-test.db")
            .max_connections(10)
            .min_connections(2)
            .run_migrations(false);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert!(!config.run_migrations);
        assert!(!config.is_in_memory());
        assert!(StoreConfig::in_memory().is_in_memory());
    }
}
