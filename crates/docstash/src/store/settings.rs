//! Settings and messages storage traits.
//!
//! Both are singleton documents replaced wholesale on write.

use async_trait::async_trait;
use serde_json::Value;

use crate::model::Settings;

use super::error::StorageResult;

/// Storage interface for the settings document.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load settings, materializing the default document if absent.
    async fn get(&self) -> StorageResult<Settings>;

    /// Replace the settings document. No merge with previous content.
    async fn put(&self, settings: Settings) -> StorageResult<Settings>;
}

/// Storage interface for the messages document.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Load messages, materializing `[]` if absent.
    async fn get(&self) -> StorageResult<Value>;

    /// Replace the messages document.
    async fn put(&self, messages: Value) -> StorageResult<Value>;
}
