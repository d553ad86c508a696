//! File-based storage implementations.
//!
//! Every document is one pretty-printed JSON file under the storage root:
//! - `users.json` - array of user records
//! - `settings.json` - settings object
//! - `messages.json` - messages value (array by default)
//!
//! All writes use atomic operations (temp file + rename) to prevent corruption.

mod document;
mod messages;
mod settings;
mod users;

use std::path::Path;

use tokio::fs;

use crate::store::error::{StorageError, StorageResult};

pub use document::JsonDocumentStore;
pub use messages::FileMessageStore;
pub use settings::FileSettingsStore;
pub use users::FileUserStore;

/// File name of the users document.
pub const USERS_FILE: &str = "users.json";
/// File name of the settings document.
pub const SETTINGS_FILE: &str = "settings.json";
/// File name of the messages document.
pub const MESSAGES_FILE: &str = "messages.json";

/// Write `content` to `tmp_path`, then rename it over `path`.
pub(crate) async fn atomic_write_file(
    tmp_path: &Path,
    path: &Path,
    content: &[u8],
) -> StorageResult<()> {
    fs::write(tmp_path, content)
        .await
        .map_err(|e| StorageError::unavailable(tmp_path, e))?;

    if let Err(e) = fs::rename(tmp_path, path).await {
        let _ = fs::remove_file(tmp_path).await;
        return Err(StorageError::unavailable(path, e));
    }

    Ok(())
}
