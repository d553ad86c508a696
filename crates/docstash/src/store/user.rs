//! User collection storage trait.

use async_trait::async_trait;

use crate::model::User;

use super::error::StorageResult;

/// Storage interface for the users collection.
///
/// Users form an ordered sequence addressed by their `id` field. Updates keep
/// a record's position; new records are appended.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// List all users in stored order.
    async fn list(&self) -> StorageResult<Vec<User>>;

    /// Load the first user whose `id` matches.
    ///
    /// Returns `StorageError::NotFound` if no record matches.
    async fn get(&self, id: &str) -> StorageResult<User>;

    /// Replace the user with this `id` in place, or append it.
    ///
    /// `id` is used for lookup only; the record is stored exactly as given.
    async fn upsert(&self, id: &str, user: User) -> StorageResult<User>;

    /// Remove every user whose `id` matches. Missing ids are not an error.
    async fn delete(&self, id: &str) -> StorageResult<()>;
}
