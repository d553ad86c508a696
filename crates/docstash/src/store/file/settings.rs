//! File-based settings document.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::model::{DefaultSettings, Settings};
use crate::store::error::{StorageError, StorageResult};
use crate::store::settings::SettingsStore;

use super::{JsonDocumentStore, SETTINGS_FILE};

/// File-based implementation of `SettingsStore`, backed by `settings.json`.
#[derive(Clone)]
pub struct FileSettingsStore {
    documents: JsonDocumentStore,
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(documents: JsonDocumentStore) -> Self {
        let path = documents.document_path(SETTINGS_FILE);
        Self { documents, path }
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn get(&self) -> StorageResult<Settings> {
        let value = self
            .documents
            .read(&self.path, DefaultSettings::default().to_value())
            .await?;

        Settings::try_from(value)
            .map_err(|_| StorageError::corrupt(&self.path, "expected a JSON object"))
    }

    async fn put(&self, settings: Settings) -> StorageResult<Settings> {
        let value = settings.clone().into_value();
        self.documents.write(&self.path, &value).await?;
        tracing::debug!(path = %self.path.display(), "saved settings");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    async fn create_store(temp_dir: &TempDir) -> FileSettingsStore {
        let documents = JsonDocumentStore::new(temp_dir.path().join("data"));
        documents.init().await.unwrap();
        FileSettingsStore::new(documents)
    }

    #[tokio::test]
    async fn fresh_store_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir).await;

        let settings = store.get().await.unwrap();
        assert_eq!(
            settings.get("systemSettings").unwrap()["recaptchaEnabled"],
            json!(false)
        );
        assert_eq!(settings.get("testimonials"), Some(&json!([])));
        assert_eq!(settings.get("walletConfig"), Some(&json!({})));

        let content =
            std::fs::read_to_string(temp_dir.path().join("data/settings.json")).unwrap();
        let on_disk: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(on_disk, DefaultSettings::default().to_value());
    }

    #[tokio::test]
    async fn put_replaces_without_merge() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir).await;
        store.get().await.unwrap();

        let subset = Settings::try_from(json!({"walletConfig": {"chain": "x"}})).unwrap();
        let stored = store.put(subset.clone()).await.unwrap();
        assert_eq!(stored, subset);

        let loaded = store.get().await.unwrap();
        assert_eq!(loaded, subset);
        assert!(loaded.get("systemSettings").is_none());
    }

    #[tokio::test]
    async fn non_object_on_disk_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir).await;
        std::fs::write(temp_dir.path().join("data/settings.json"), "[]").unwrap();

        assert!(matches!(
            store.get().await.unwrap_err(),
            StorageError::CorruptDocument { .. }
        ));
    }
}
