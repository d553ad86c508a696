//! Single-file JSON documents.
//!
//! A document is the whole JSON value held in one file under the storage
//! root. A missing file reads as the caller's default, which is written to
//! disk on that first read. Writes replace the entire file atomically and are
//! serialized per path, so concurrent read-modify-write cycles on the same
//! document never lose an update.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;

use crate::store::error::{StorageError, StorageResult};
use crate::sync::KeyedLocks;

/// Read/write-with-default primitive over a directory of JSON files.
#[derive(Clone)]
pub struct JsonDocumentStore {
    root: PathBuf,
    media_dirs: Vec<PathBuf>,
    locks: KeyedLocks,
}

impl JsonDocumentStore {
    /// Create a store rooted at `root`. Nothing is touched on disk until
    /// [`init`](Self::init) or the first read/write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            media_dirs: Vec::new(),
            locks: KeyedLocks::new(),
        }
    }

    /// Subdirectories (relative to the root) provisioned by `init` for media uploads.
    pub fn with_media_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.media_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// The storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a named document under the root.
    pub fn document_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Create the storage root and media subdirectories if absent.
    pub async fn init(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StorageError::unavailable(&self.root, e))?;

        for dir in &self.media_dirs {
            let path = self.root.join(dir);
            fs::create_dir_all(&path)
                .await
                .map_err(|e| StorageError::unavailable(&path, e))?;
        }

        tracing::debug!(root = %self.root.display(), "storage initialized");
        Ok(())
    }

    /// Read a document, materializing `default` if the file does not exist.
    pub async fn read(&self, path: &Path, default: Value) -> StorageResult<Value> {
        if let Some(value) = Self::load(path).await? {
            return Ok(value);
        }

        let lock = self.locks.get(path);
        let _guard = lock.lock().await;

        // Another task may have materialized or written it while we waited.
        if let Some(value) = Self::load(path).await? {
            return Ok(value);
        }
        Self::persist(path, &default).await?;
        tracing::info!(path = %path.display(), "materialized default document");
        Ok(default)
    }

    /// Replace a document's entire content.
    pub async fn write(&self, path: &Path, value: &Value) -> StorageResult<()> {
        let lock = self.locks.get(path);
        let _guard = lock.lock().await;
        Self::persist(path, value).await
    }

    /// Read-modify-write a document while holding its lock.
    ///
    /// `f` receives the current value (or `default` if missing) and mutates it
    /// in place. The mutated value is persisted only if `f` returns `Ok`.
    pub async fn update<F, R>(&self, path: &Path, default: Value, f: F) -> StorageResult<R>
    where
        F: FnOnce(&mut Value) -> StorageResult<R>,
    {
        let lock = self.locks.get(path);
        let _guard = lock.lock().await;

        let mut value = Self::load(path).await?.unwrap_or(default);
        let result = f(&mut value)?;
        Self::persist(path, &value).await?;
        Ok(result)
    }

    /// Load and parse a document. `Ok(None)` means the file does not exist.
    async fn load(path: &Path) -> StorageResult<Option<Value>> {
        let content = match fs::read(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::unavailable(path, e)),
        };

        serde_json::from_slice(&content)
            .map(Some)
            .map_err(|e| StorageError::corrupt(path, e.to_string()))
    }

    /// Serialize and atomically write. Callers must hold the path's lock.
    async fn persist(path: &Path, value: &Value) -> StorageResult<()> {
        let content = serde_json::to_vec_pretty(value)
            .map_err(|e| StorageError::serialization(e.to_string()))?;

        let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = path.with_file_name(tmp_name);

        super::atomic_write_file(&tmp_path, path, &content).await
    }
}
