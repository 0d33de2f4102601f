//! # Key-Value Store
//!
//! The storage contract the rest of Brew POS consumes: opaque string blobs
//! under string keys, with no schema.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     dyn KeyValueStore                                   │
//! │                                                                         │
//! │     get(key) ──► Option<String>                                        │
//! │     set(key, value)                                                    │
//! │     set_many([(key, value), ...])   ← all entries or none              │
//! │                                                                         │
//! │  ┌─────────────────────────┐        ┌─────────────────────────┐        │
//! │  │      SqliteStore        │        │      MemoryStore        │        │
//! │  │  kv_store table, WAL    │        │  HashMap behind a Mutex │        │
//! │  │  set_many = one SQL tx  │        │  fail_writes() for tests│        │
//! │  └─────────────────────────┘        └─────────────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// String-keyed blob storage.
///
/// Implementations must make [`KeyValueStore::set_many`] atomic: after it
/// returns an error, none of its entries are visible.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value under `key`, `None` when absent.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes (or overwrites) the value under `key`.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Writes every entry, or none of them.
    async fn set_many(&self, entries: &[(String, String)]) -> StoreResult<()>;
}

// =============================================================================
// In-Memory Backend
// =============================================================================

#[derive(Debug, Default)]
struct MemoryInner {
    values: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

/// Process-local store for tests and `--memory` runs.
///
/// Clones share the same map, so a test can keep a handle while the
/// application owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<MemoryInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// When `true`, every write fails with `WriteRejected` and changes
    /// nothing. Reads keep working.
    pub fn fail_writes(&self, fail: bool) {
        self.inner.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `set`/`set_many` calls so far.
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    fn check_writable(&self, key: &str) -> StoreResult<()> {
        if self.inner.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::WriteRejected(key.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.inner.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.check_writable(key)?;
        self.inner
            .values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        debug!(key, bytes = value.len(), "Memory store write");
        Ok(())
    }

    async fn set_many(&self, entries: &[(String, String)]) -> StoreResult<()> {
        let keys: Vec<&str> = entries.iter().map(|(k, _)| k.as_str()).collect();
        self.check_writable(&keys.join(","))?;

        let mut values = self.inner.values.lock().await;
        for (key, value) in entries {
            values.insert(key.clone(), value.clone());
        }
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        debug!(keys = ?keys, "Memory store batch write");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_set() {
        let store = MemoryStore::new();
        assert_eq!(store.get("coffee_products").await.unwrap(), None);

        store.set("coffee_products", "[]").await.unwrap();
        assert_eq!(
            store.get("coffee_products").await.unwrap().as_deref(),
            Some("[]")
        );
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_values() {
        let store = MemoryStore::new();
        let handle = store.clone();
        store.set("k", "v").await.unwrap();
        assert_eq!(handle.get("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_fail_writes_changes_nothing() {
        let store = MemoryStore::new();
        store.set("a", "1").await.unwrap();
        store.fail_writes(true);

        let batch = vec![
            ("a".to_string(), "2".to_string()),
            ("b".to_string(), "2".to_string()),
        ];
        assert!(matches!(
            store.set_many(&batch).await,
            Err(StoreError::WriteRejected(_))
        ));
        assert!(store.set("a", "3").await.is_err());

        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("b").await.unwrap(), None);

        store.fail_writes(false);
        store.set_many(&batch).await.unwrap();
        assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));
    }
}
