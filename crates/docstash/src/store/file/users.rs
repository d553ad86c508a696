//! File-based user collection.
//!
//! Stores all users as one JSON array in `users.json`.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;

use crate::model::User;
use crate::store::error::{StorageError, StorageResult};
use crate::store::user::UserStore;

use super::{JsonDocumentStore, USERS_FILE};

/// File-based implementation of `UserStore`.
#[derive(Clone)]
pub struct FileUserStore {
    documents: JsonDocumentStore,
    path: PathBuf,
}

impl FileUserStore {
    pub fn new(documents: JsonDocumentStore) -> Self {
        let path = documents.document_path(USERS_FILE);
        Self { documents, path }
    }

    fn default_document() -> Value {
        Value::Array(Vec::new())
    }

    /// Apply the `User` view to the raw document.
    fn parse(&self, value: Value) -> StorageResult<Vec<User>> {
        serde_json::from_value(value).map_err(|e| {
            StorageError::corrupt(&self.path, format!("expected an array of objects: {e}"))
        })
    }

    /// Borrow the raw document as an array of objects, rejecting any other
    /// shape. Same check as `parse`.
    fn as_records<'a>(&self, value: &'a mut Value) -> StorageResult<&'a mut Vec<Value>> {
        match value.as_array_mut() {
            Some(records) if records.iter().all(Value::is_object) => Ok(records),
            _ => Err(StorageError::corrupt(
                &self.path,
                "expected an array of objects",
            )),
        }
    }
}

fn has_id(record: &Value, id: &str) -> bool {
    record.get("id").and_then(Value::as_str) == Some(id)
}

#[async_trait]
impl UserStore for FileUserStore {
    async fn list(&self) -> StorageResult<Vec<User>> {
        let value = self
            .documents
            .read(&self.path, Self::default_document())
            .await?;
        self.parse(value)
    }

    async fn get(&self, id: &str) -> StorageResult<User> {
        self.list()
            .await?
            .into_iter()
            .find(|user| user.id() == Some(id))
            .ok_or_else(|| StorageError::not_found("user", id))
    }

    async fn upsert(&self, id: &str, user: User) -> StorageResult<User> {
        if let Some(body_id) = user.id()
            && body_id != id
        {
            tracing::warn!(path_id = %id, body_id = %body_id, "user id in body differs from path");
        }

        let record = user.clone().into_value();
        let inserted = self
            .documents
            .update(&self.path, Self::default_document(), |value| {
                let records = self.as_records(value)?;
                match records.iter().position(|r| has_id(r, id)) {
                    Some(index) => {
                        records[index] = record;
                        Ok(false)
                    }
                    None => {
                        records.push(record);
                        Ok(true)
                    }
                }
            })
            .await?;

        tracing::debug!(id = %id, inserted, "saved user");
        Ok(user)
    }

    async fn delete(&self, id: &str) -> StorageResult<()> {
        let removed = self
            .documents
            .update(&self.path, Self::default_document(), |value| {
                let records = self.as_records(value)?;
                let before = records.len();
                records.retain(|r| !has_id(r, id));
                Ok(before - records.len())
            })
            .await?;

        tracing::debug!(id = %id, removed, "deleted user");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    async fn create_store(temp_dir: &TempDir) -> FileUserStore {
        let documents = JsonDocumentStore::new(temp_dir.path().join("data"));
        documents.init().await.unwrap();
        FileUserStore::new(documents)
    }

    fn user(value: Value) -> User {
        User::try_from(value).unwrap()
    }

    fn names(users: &[User]) -> Vec<&str> {
        users
            .iter()
            .map(|u| u.get("name").and_then(Value::as_str).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn list_materializes_empty_array() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir).await;

        assert!(store.list().await.unwrap().is_empty());

        let content = std::fs::read_to_string(temp_dir.path().join("data/users.json")).unwrap();
        let on_disk: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(on_disk, json!([]));
    }

    #[tokio::test]
    async fn upsert_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir).await;
        let ann = user(json!({"id": "u1", "name": "Ann", "tags": ["a"]}));

        let stored = store.upsert("u1", ann.clone()).await.unwrap();
        assert_eq!(stored, ann);
        assert_eq!(store.get("u1").await.unwrap(), ann);
    }

    #[tokio::test]
    async fn upsert_existing_replaces_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir).await;

        store
            .upsert("u1", user(json!({"id": "u1", "name": "Ann"})))
            .await
            .unwrap();
        store
            .upsert("u2", user(json!({"id": "u2", "name": "Bob"})))
            .await
            .unwrap();
        store
            .upsert("u1", user(json!({"id": "u1", "name": "Ann2"})))
            .await
            .unwrap();

        let users = store.list().await.unwrap();
        assert_eq!(names(&users), vec!["Ann2", "Bob"]);
    }

    #[tokio::test]
    async fn upsert_same_id_twice_keeps_one_record() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir).await;

        store
            .upsert("u1", user(json!({"id": "u1", "name": "Ann"})))
            .await
            .unwrap();
        store
            .upsert("u1", user(json!({"id": "u1", "name": "Ann2"})))
            .await
            .unwrap();

        let users = store.list().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(names(&users), vec!["Ann2"]);
    }

    #[tokio::test]
    async fn upsert_new_id_appends() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir).await;

        for (id, name) in [("c", "Cy"), ("a", "Al"), ("b", "Bo")] {
            store
                .upsert(id, user(json!({"id": id, "name": name})))
                .await
                .unwrap();
        }

        let users = store.list().await.unwrap();
        assert_eq!(names(&users), vec!["Cy", "Al", "Bo"]);
    }

    #[tokio::test]
    async fn upsert_stores_body_verbatim_when_ids_differ() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir).await;

        store
            .upsert("u1", user(json!({"id": "other", "name": "Ann"})))
            .await
            .unwrap();

        // Lookup is by stored id, so the path id no longer finds it.
        assert!(store.get("u1").await.unwrap_err().is_not_found());
        assert_eq!(store.get("other").await.unwrap().id(), Some("other"));
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir).await;

        let err = store.get("nobody").await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::NotFound {
                entity_type: "user",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn delete_removes_record_and_keeps_order() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir).await;

        for (id, name) in [("u1", "Ann"), ("u2", "Bob"), ("u3", "Cy")] {
            store
                .upsert(id, user(json!({"id": id, "name": name})))
                .await
                .unwrap();
        }
        store.delete("u1").await.unwrap();

        assert!(store.get("u1").await.unwrap_err().is_not_found());
        assert_eq!(names(&store.list().await.unwrap()), vec!["Bob", "Cy"]);
    }

    #[tokio::test]
    async fn delete_nonexistent_ok() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir).await;

        store.delete("never").await.unwrap();
        assert!(store.get("never").await.unwrap_err().is_not_found());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_removes_all_duplicates() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir).await;
        std::fs::write(
            temp_dir.path().join("data/users.json"),
            r#"[{"id":"u1","n":1},{"id":"u2","n":2},{"id":"u1","n":3}]"#,
        )
        .unwrap();

        store.delete("u1").await.unwrap();

        let users = store.list().await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id(), Some("u2"));
    }

    #[tokio::test]
    async fn wrong_shape_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir).await;
        std::fs::write(temp_dir.path().join("data/users.json"), r#"{"id":"u1"}"#).unwrap();

        assert!(matches!(
            store.list().await.unwrap_err(),
            StorageError::CorruptDocument { .. }
        ));
        assert!(matches!(
            store
                .upsert("u1", user(json!({"id": "u1"})))
                .await
                .unwrap_err(),
            StorageError::CorruptDocument { .. }
        ));
    }

    #[tokio::test]
    async fn non_object_element_is_corrupt_for_every_operation() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir).await;
        let path = temp_dir.path().join("data/users.json");
        let original = r#"[{"id":"u1"},5]"#;
        std::fs::write(&path, original).unwrap();

        for err in [
            store.list().await.unwrap_err(),
            store.get("u1").await.unwrap_err(),
            store
                .upsert("u2", user(json!({"id": "u2"})))
                .await
                .unwrap_err(),
            store.delete("u1").await.unwrap_err(),
        ] {
            assert!(matches!(err, StorageError::CorruptDocument { .. }));
        }

        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[tokio::test]
    async fn concurrent_upserts_keep_both_records() {
        let temp_dir = TempDir::new().unwrap();
        let store = create_store(&temp_dir).await;

        let a = {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .upsert("a", user(json!({"id": "a", "name": "A"})))
                    .await
            })
        };
        let b = {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .upsert("b", user(json!({"id": "b", "name": "B"})))
                    .await
            })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let users = store.list().await.unwrap();
        assert_eq!(users.len(), 2);
        assert!(store.get("a").await.is_ok());
        assert!(store.get("b").await.is_ok());
    }
}
