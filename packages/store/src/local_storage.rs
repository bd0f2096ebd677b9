//! # Browser localStorage backend
//!
//! [`LocalStorage`] is the [`SessionStorage`] used on the **web platform**. Entries
//! go straight into `window.localStorage`, which survives reloads and is shared by
//! every tab of the origin.
//!
//! `LocalStorage` is a zero-size handle; the `Storage` object is looked up on each
//! call because `web_sys::Storage` is not `Send` and the window may be absent
//! (e.g. inside a worker). Every failure is logged and then treated as "no entry".

use tracing::warn;
use web_sys::Storage;

use crate::storage::SessionStorage;

/// `window.localStorage`-backed SessionStorage for the web platform.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage(&self) -> Option<Storage> {
        let window = web_sys::window()?;
        match window.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                warn!(error = ?e, "localStorage unavailable");
                None
            }
        }
    }
}

impl SessionStorage for LocalStorage {
    async fn get(&self, key: &str) -> Option<String> {
        let storage = self.storage()?;
        match storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = ?e, "failed to read localStorage entry");
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str) {
        let Some(storage) = self.storage() else {
            return;
        };
        if let Err(e) = storage.set_item(key, value) {
            warn!(key, error = ?e, "failed to write localStorage entry");
        }
    }

    async fn remove(&self, key: &str) {
        let Some(storage) = self.storage() else {
            return;
        };
        if let Err(e) = storage.remove_item(key) {
            warn!(key, error = ?e, "failed to remove localStorage entry");
        }
    }
}
