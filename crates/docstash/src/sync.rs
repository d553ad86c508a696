//! Synchronization primitives for docstash.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

/// Per-key async mutex.
///
/// Different keys can be held concurrently while operations on the same key
/// are serialized. Keys are document paths, so the map stays as small as the
/// set of documents the store has touched.
///
/// # Example
///
/// ```ignore
/// let locks = KeyedLocks::new();
///
/// let users = locks.get(Path::new("data/users.json"));
/// let _guard = users.lock().await;
/// // Another locks.get("data/users.json").lock().await would wait here
/// ```
#[derive(Clone, Default)]
pub struct KeyedLocks {
    locks: Arc<DashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    /// Create a new empty lock collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the lock for the given key.
    pub fn get(&self, key: &Path) -> Arc<Mutex<()>> {
        if let Some(lock) = self.locks.get(key) {
            return Arc::clone(lock.value());
        }
        let entry = self
            .locks
            .entry(key.to_path_buf())
            .or_insert_with(|| Arc::new(Mutex::new(())));
        Arc::clone(entry.value())
    }

    /// Return the number of keys that have a lock.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Return true if no lock has been created yet.
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
