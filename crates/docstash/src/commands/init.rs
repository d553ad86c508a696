use std::path::Path;

use anyhow::Result;
use tokio::fs;

use docstash::server::Stores;
use docstash::store::file::JsonDocumentStore;

const TEMPLATE_CONFIG: &str = include_str!("../../templates/docstash.yaml");

pub async fn run(config_path: &str, data_dir_override: Option<&Path>) -> Result<()> {
    let wrote_config = write_if_not_exists(Path::new(config_path), TEMPLATE_CONFIG).await?;
    let (_, documents) = super::load_storage(config_path, data_dir_override).await?;

    init_at(&documents).await?;

    println!();
    if wrote_config {
        println!("Created {config_path}");
    }
    println!("Storage ready at {}", documents.root().display());
    println!("Run: docstash serve --config {config_path}");
    Ok(())
}

/// Provision directories and materialize every default document.
async fn init_at(documents: &JsonDocumentStore) -> Result<()> {
    documents.init().await?;

    let stores = Stores::file(documents.clone());
    stores.users.list().await?;
    stores.settings.get().await?;
    stores.messages.get().await?;
    Ok(())
}

/// Writes content to path only if the file does not already exist.
/// Returns `true` if the file was written, `false` if skipped.
async fn write_if_not_exists(path: &Path, content: &str) -> Result<bool> {
    if fs::try_exists(path).await? {
        return Ok(false);
    }
    fs::write(path, content).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_materializes_layout() {
        let tmp = TempDir::new().unwrap();
        let documents = JsonDocumentStore::new(tmp.path().join("data"))
            .with_media_dirs(["uploads/images", "uploads/videos"]);

        init_at(&documents).await.unwrap();

        let root = tmp.path().join("data");
        for file in ["users.json", "settings.json", "messages.json"] {
            assert!(root.join(file).is_file(), "missing {file}");
        }
        assert!(root.join("uploads/images").is_dir());
        assert!(root.join("uploads/videos").is_dir());
    }

    #[tokio::test]
    async fn test_init_preserves_existing_documents() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("data");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("users.json"), r#"[{"id":"u1"}]"#).unwrap();

        init_at(&JsonDocumentStore::new(&root)).await.unwrap();

        let content = std::fs::read_to_string(root.join("users.json")).unwrap();
        assert_eq!(content, r#"[{"id":"u1"}]"#);
    }

    #[tokio::test]
    async fn test_write_if_not_exists() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("docstash.yaml");

        assert!(write_if_not_exists(&path, "a").await.unwrap());
        assert!(!write_if_not_exists(&path, "b").await.unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a");
    }
}
