//! # Session store — single source of truth for authentication state
//!
//! [`SessionStore`] is an explicit context object: construct it once with
//! [`SessionStore::init`], hand clones to the request client and the UI, call
//! [`SessionStore::hydrate`] at start-up and [`SessionStore::teardown`] when the
//! shell goes away. Clones share the same state.
//!
//! ## State
//!
//! The in-memory [`SessionState`] lives in a [`tokio::sync::watch`] channel so that
//! [`current`](SessionStore::current) is a synchronous read and subscribers (the
//! route guard, the navbar) are woken on every identity change. Every mutation
//! updates memory first and then mirrors the change into [`SessionStorage`].
//!
//! | Operation | In-memory effect | Durable effect |
//! |-----------|------------------|----------------|
//! | [`hydrate`](SessionStore::hydrate) | `Hydrating` → `Active` / `Anonymous` | scrubs partial leftovers |
//! | [`save`](SessionStore::save) | → `Active` | writes all three entries |
//! | [`replace_access_token`](SessionStore::replace_access_token) | swaps the token of the `Active` session that owns the refresh token | rewrites the token entries |
//! | [`clear`](SessionStore::clear) | → `Anonymous` | removes all three entries |
//! | [`clear_if_holding`](SessionStore::clear_if_holding) | → `Anonymous` if the refresh token matches | removes all three entries |
//! | [`teardown`](SessionStore::teardown) | → `Hydrating` | none |
//!
//! There is no locking beyond the channel itself. `save` and `clear` interleave and
//! the last write wins; the two refresh-driven operations first check that the
//! session still holds the refresh token they were started with.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::models::{Session, SessionGrant, SessionState, UserIdentity};
use crate::storage::{
    SessionStorage, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, SESSION_KEYS, USER_KEY,
};

/// Shared handle to the session state and its durable storage.
pub struct SessionStore<S> {
    inner: Arc<Inner<S>>,
}

struct Inner<S> {
    storage: S,
    state: watch::Sender<SessionState>,
}

impl<S> Clone for SessionStore<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> PartialEq for SessionStore<S> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S: SessionStorage> SessionStore<S> {
    /// Create a store in the `Hydrating` state. Nothing is read until [`hydrate`](Self::hydrate).
    pub fn init(storage: S) -> Self {
        let (state, _) = watch::channel(SessionState::Hydrating);
        Self {
            inner: Arc::new(Inner { storage, state }),
        }
    }

    /// Synchronous snapshot of the current state.
    pub fn current(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    pub fn storage(&self) -> &S {
        &self.inner.storage
    }

    /// Reconstruct the session from durable storage.
    ///
    /// A session is restored only when both the access token and a parseable user
    /// entry exist. Anything less resolves to `Anonymous` and the leftovers are
    /// removed. If a login completed while storage was being read, that login wins.
    pub async fn hydrate(&self) -> SessionState {
        let storage = &self.inner.storage;
        let access = non_empty(storage.get(ACCESS_TOKEN_KEY).await);
        let refresh = non_empty(storage.get(REFRESH_TOKEN_KEY).await);
        let raw_user = non_empty(storage.get(USER_KEY).await);
        let had_leftovers = access.is_some() || refresh.is_some() || raw_user.is_some();

        let restored = match (access, raw_user) {
            (Some(access_token), Some(raw)) => match serde_json::from_str::<UserIdentity>(&raw) {
                Ok(user) => Some(Session {
                    access_token,
                    refresh_token: refresh,
                    user,
                }),
                Err(e) => {
                    warn!(error = %e, "discarding unreadable stored user");
                    None
                }
            },
            _ => None,
        };

        let next = match restored {
            Some(session) => SessionState::Active(session),
            None => SessionState::Anonymous,
        };
        let applied = self.inner.state.send_if_modified(|state| {
            if state.is_hydrating() {
                *state = next.clone();
                true
            } else {
                false
            }
        });

        if applied {
            match &next {
                SessionState::Active(session) => {
                    info!(user = %session.user.username, role = %session.user.role, "session restored");
                }
                _ if had_leftovers => {
                    debug!("scrubbing partial session entries");
                    self.remove_entries().await;
                }
                _ => debug!("no stored session"),
            }
        }

        self.current()
    }

    /// Store a fresh login and mark the session active.
    pub async fn save(&self, grant: SessionGrant) {
        let session = Session::from(grant);
        info!(user = %session.user.username, role = %session.user.role, "session saved");
        self.inner
            .state
            .send_replace(SessionState::Active(session.clone()));
        self.write_entries(&session).await;
    }

    /// Swap the access token (and optionally a rotated refresh token) of the active session.
    ///
    /// `used_refresh` is the refresh token the new access token was obtained with. The
    /// swap only happens while the active session still holds that refresh token;
    /// otherwise nothing is touched and `false` is returned. A refresh finishing after
    /// a logout, or after a different login, cannot leak its token into that state.
    pub async fn replace_access_token(
        &self,
        used_refresh: &str,
        access_token: String,
        rotated_refresh: Option<String>,
    ) -> bool {
        let applied = self.inner.state.send_if_modified(|state| match state {
            SessionState::Active(session)
                if session.refresh_token.as_deref() == Some(used_refresh) =>
            {
                session.access_token = access_token.clone();
                if let Some(refresh) = &rotated_refresh {
                    session.refresh_token = Some(refresh.clone());
                }
                true
            }
            _ => false,
        });
        if !applied {
            debug!("ignoring access token for a session that no longer holds its refresh token");
            return false;
        }
        let storage = &self.inner.storage;
        storage.set(ACCESS_TOKEN_KEY, &access_token).await;
        if let Some(refresh) = &rotated_refresh {
            storage.set(REFRESH_TOKEN_KEY, refresh).await;
        }
        true
    }

    /// Clear the session only if it still holds `refresh_token`.
    ///
    /// Used when a refresh is rejected: a login that completed meanwhile is kept.
    pub async fn clear_if_holding(&self, refresh_token: &str) -> bool {
        let holds = self.inner.state.send_if_modified(|state| {
            if state.refresh_token() == Some(refresh_token) {
                *state = SessionState::Anonymous;
                true
            } else {
                false
            }
        });
        if holds {
            info!("session cleared");
            self.remove_entries().await;
        } else {
            debug!("session changed during refresh, keeping it");
        }
        holds
    }

    /// Forget the in-memory state without touching durable storage.
    ///
    /// The store returns to `Hydrating`; call [`hydrate`](Self::hydrate) to use it again.
    pub fn teardown(&self) {
        self.inner.state.send_replace(SessionState::Hydrating);
    }

    async fn write_entries(&self, session: &Session) {
        let storage = &self.inner.storage;
        storage.set(ACCESS_TOKEN_KEY, &session.access_token).await;
        match &session.refresh_token {
            Some(refresh) => storage.set(REFRESH_TOKEN_KEY, refresh).await,
            None => storage.remove(REFRESH_TOKEN_KEY).await,
        }
        match serde_json::to_string(&session.user) {
            Ok(raw) => storage.set(USER_KEY, &raw).await,
            Err(e) => warn!(error = %e, "failed to serialize user"),
        }
    }

    async fn remove_entries(&self) {
        for key in SESSION_KEYS {
            self.inner.storage.remove(key).await;
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStorage;
    use crate::models::Role;
    use crate::storage::SessionStorage;

    fn grant(role: Role) -> SessionGrant {
        SessionGrant {
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
            user: UserIdentity {
                id: 42,
                username: "asha".to_string(),
                role,
            },
        }
    }

    #[tokio::test]
    async fn test_starts_hydrating() {
        let store = SessionStore::init(MemoryStorage::new());
        assert_eq!(store.current(), SessionState::Hydrating);
    }

    #[tokio::test]
    async fn test_hydrate_empty_storage_is_anonymous() {
        let store = SessionStore::init(MemoryStorage::new());
        assert_eq!(store.hydrate().await, SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_save_persists_and_rehydrates() {
        let storage = MemoryStorage::new();
        let store = SessionStore::init(storage.clone());
        store.hydrate().await;
        store.save(grant(Role::Vendor)).await;

        assert_eq!(storage.len(), 3);
        assert_eq!(store.current().user().map(|u| u.role), Some(Role::Vendor));

        // A second process start reads the same entries back.
        let reloaded = SessionStore::init(storage);
        let state = reloaded.hydrate().await;
        let session = state.session().unwrap();
        assert_eq!(session.access_token, "access-1");
        assert_eq!(session.refresh_token.as_deref(), Some("refresh-1"));
        assert_eq!(session.user.username, "asha");
    }

    #[tokio::test]
    async fn test_clear_removes_all_entries() {
        let storage = MemoryStorage::new();
        let store = SessionStore::init(storage.clone());
        store.hydrate().await;
        store.save(grant(Role::Customer)).await;

        store.clear().await;
        assert_eq!(store.current(), SessionState::Anonymous);
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_hydrate_scrubs_token_without_user() {
        let storage = MemoryStorage::new();
        storage.set(ACCESS_TOKEN_KEY, "orphan").await;
        storage.set(REFRESH_TOKEN_KEY, "orphan-refresh").await;

        let store = SessionStore::init(storage.clone());
        assert_eq!(store.hydrate().await, SessionState::Anonymous);
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_hydrate_scrubs_corrupt_user() {
        let storage = MemoryStorage::new();
        storage.set(ACCESS_TOKEN_KEY, "a").await;
        storage.set(USER_KEY, "{not json").await;

        let store = SessionStore::init(storage.clone());
        assert_eq!(store.hydrate().await, SessionState::Anonymous);
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_hydrate_without_refresh_token_keeps_session() {
        let storage = MemoryStorage::new();
        storage.set(ACCESS_TOKEN_KEY, "a").await;
        storage
            .set(USER_KEY, r#"{"id":3,"username":"lee","role":"customer"}"#)
            .await;

        let store = SessionStore::init(storage);
        let state = store.hydrate().await;
        assert_eq!(state.access_token(), Some("a"));
        assert!(state.refresh_token().is_none());
    }

    #[tokio::test]
    async fn test_hydrate_does_not_override_completed_login() {
        let store = SessionStore::init(MemoryStorage::new());
        store.save(grant(Role::Customer)).await;
        store.storage().remove(USER_KEY).await;

        // Storage is now partial, but the in-memory login already happened.
        let state = store.hydrate().await;
        assert_eq!(state.access_token(), Some("access-1"));
    }

    #[tokio::test]
    async fn test_replace_access_token_updates_active_session() {
        let storage = MemoryStorage::new();
        let store = SessionStore::init(storage.clone());
        store.hydrate().await;
        store.save(grant(Role::Customer)).await;

        assert!(
            store
                .replace_access_token("refresh-1", "access-2".to_string(), None)
                .await
        );
        assert_eq!(store.current().access_token(), Some("access-2"));
        assert_eq!(store.current().refresh_token(), Some("refresh-1"));
        assert_eq!(
            storage.get(ACCESS_TOKEN_KEY).await.as_deref(),
            Some("access-2")
        );

        assert!(
            store
                .replace_access_token(
                    "refresh-1",
                    "access-3".to_string(),
                    Some("refresh-2".to_string())
                )
                .await
        );
        assert_eq!(
            storage.get(REFRESH_TOKEN_KEY).await.as_deref(),
            Some("refresh-2")
        );
    }

    #[tokio::test]
    async fn test_replace_access_token_ignored_when_anonymous() {
        let storage = MemoryStorage::new();
        let store = SessionStore::init(storage.clone());
        store.hydrate().await;

        assert!(
            !store
                .replace_access_token("refresh-1", "late".to_string(), None)
                .await
        );
        assert_eq!(store.current(), SessionState::Anonymous);
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_replace_access_token_ignored_after_another_login() {
        let storage = MemoryStorage::new();
        let store = SessionStore::init(storage.clone());
        store.hydrate().await;
        store.save(grant(Role::Customer)).await;

        let mut other = grant(Role::Vendor);
        other.access_token = "other-access".to_string();
        other.refresh_token = "other-refresh".to_string();
        other.user.username = "bo".to_string();
        store.save(other).await;

        assert!(
            !store
                .replace_access_token("refresh-1", "late".to_string(), None)
                .await
        );
        assert_eq!(store.current().access_token(), Some("other-access"));
        assert_eq!(
            storage.get(ACCESS_TOKEN_KEY).await.as_deref(),
            Some("other-access")
        );
    }

    #[tokio::test]
    async fn test_clear_if_holding_keeps_newer_login() {
        let store = SessionStore::init(MemoryStorage::new());
        store.hydrate().await;
        store.save(grant(Role::Customer)).await;

        assert!(!store.clear_if_holding("stale-refresh").await);
        assert!(store.current().session().is_some());

        assert!(store.clear_if_holding("refresh-1").await);
        assert_eq!(store.current(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_subscribers_see_login_and_logout() {
        let store = SessionStore::init(MemoryStorage::new());
        let mut rx = store.subscribe();
        store.hydrate().await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), SessionState::Anonymous);

        store.save(grant(Role::Vendor)).await;
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().user().is_some());

        store.clear().await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_teardown_returns_to_hydrating() {
        let storage = MemoryStorage::new();
        let store = SessionStore::init(storage.clone());
        store.hydrate().await;
        store.save(grant(Role::Customer)).await;

        store.teardown();
        assert_eq!(store.current(), SessionState::Hydrating);
        // Durable entries are untouched.
        assert_eq!(storage.len(), 3);
        assert!(store.hydrate().await.session().is_some());
    }
}
