//! CLI command implementations.

use std::path::{Path, PathBuf};

use anyhow::Result;

use docstash::config::{self, Config};
use docstash::store::file::JsonDocumentStore;

pub mod init;
pub mod serve;

/// Load config and build the document store it describes.
///
/// `data_dir_override` wins over the config file; relative paths in the file
/// resolve against the file's directory, relative overrides against the cwd.
pub async fn load_storage(
    config_path: &str,
    data_dir_override: Option<&Path>,
) -> Result<(Config, JsonDocumentStore)> {
    let config = Config::load(config_path).await?;

    let data_dir: PathBuf = match data_dir_override {
        Some(dir) => dir.to_path_buf(),
        None => config::resolve_path(Path::new(config_path), &config.storage.data_dir),
    };

    let documents =
        JsonDocumentStore::new(data_dir).with_media_dirs(config.storage.media_dirs.clone());
    Ok((config, documents))
}
