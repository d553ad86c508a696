//! File-based messages document.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use crate::store::error::StorageResult;
use crate::store::settings::MessageStore;

use super::{JsonDocumentStore, MESSAGES_FILE};

/// File-based implementation of `MessageStore`, backed by `messages.json`.
///
/// The document is stored as given; an array is expected but not enforced.
#[derive(Clone)]
pub struct FileMessageStore {
    documents: JsonDocumentStore,
    path: PathBuf,
}

impl FileMessageStore {
    pub fn new(documents: JsonDocumentStore) -> Self {
        let path = documents.document_path(MESSAGES_FILE);
        Self { documents, path }
    }
}

#[async_trait]
impl MessageStore for FileMessageStore {
    async fn get(&self) -> StorageResult<Value> {
        self.documents
            .read(&self.path, Value::Array(Vec::new()))
            .await
    }

    async fn put(&self, messages: Value) -> StorageResult<Value> {
        self.documents.write(&self.path, &messages).await?;
        tracing::debug!(path = %self.path.display(), "saved messages");
        Ok(messages)
    }
}
