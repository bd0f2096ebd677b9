//! # Filesystem-backed session storage
//!
//! [`FileStorage`] persists each session entry as its own file so a native shell
//! keeps the user logged in across restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── access_token
//! ├── refresh_token
//! └── user            # JSON identity
//! ```
//!
//! [`crate::platform_storage`] places `<base_dir>` under [`dirs::data_dir()`]:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS | `~/Library/Application Support/marketplace/session/` |
//! | Linux | `~/.local/share/marketplace/session/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\marketplace\session\` |

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::storage::SessionStorage;

/// Filesystem-backed SessionStorage for native targets.
#[derive(Clone, Debug)]
pub struct FileStorage {
    base: PathBuf,
}

impl FileStorage {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.base.join(key)
    }
}

impl SessionStorage for FileStorage {
    async fn get(&self, key: &str) -> Option<String> {
        match std::fs::read_to_string(self.entry_path(key)) {
            Ok(value) => Some(value),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!(key, error = %e, "failed to read session entry");
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str) {
        if let Err(e) = std::fs::create_dir_all(&self.base) {
            warn!(path = %self.base.display(), error = %e, "failed to create session directory");
            return;
        }
        if let Err(e) = std::fs::write(self.entry_path(key), value) {
            warn!(key, error = %e, "failed to write session entry");
        }
    }

    async fn remove(&self, key: &str) {
        match std::fs::remove_file(self.entry_path(key)) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(key, error = %e, "failed to remove session entry"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("session");

        let storage = FileStorage::new(base.clone());
        storage.set("access_token", "token-1").await;
        storage.set("user", r#"{"id":1,"username":"a","role":"customer"}"#).await;

        let reopened = FileStorage::new(base.clone());
        assert_eq!(reopened.get("access_token").await.as_deref(), Some("token-1"));
        assert!(reopened.get("refresh_token").await.is_none());
        assert!(base.join("user").exists());
    }

    #[tokio::test]
    async fn test_remove_missing_entry_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf());

        storage.remove("refresh_token").await;
        storage.set("refresh_token", "r").await;
        storage.remove("refresh_token").await;
        assert!(storage.get("refresh_token").await.is_none());
    }
}
