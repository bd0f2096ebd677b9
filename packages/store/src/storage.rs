//! # Durable key/value storage for the session
//!
//! [`SessionStorage`] is the async seam between the [`crate::SessionStore`] and the
//! platform's persistence. The session occupies exactly three string entries:
//!
//! | Key | Value |
//! |-----|-------|
//! | [`ACCESS_TOKEN_KEY`] | opaque access token |
//! | [`REFRESH_TOKEN_KEY`] | opaque refresh token |
//! | [`USER_KEY`] | JSON `{"id", "username", "role"}` |
//!
//! Backends never fail loudly: reads return `None` and writes are best effort,
//! logging what went wrong. A missing or broken backend therefore looks like
//! "nobody is logged in".

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_KEY: &str = "user";

/// All keys owned by the session, in write order.
pub const SESSION_KEYS: [&str; 3] = [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY];

/// Async trait for durable string storage.
pub trait SessionStorage {
    fn get(&self, key: &str) -> impl std::future::Future<Output = Option<String>>;
    fn set(&self, key: &str, value: &str) -> impl std::future::Future<Output = ()>;
    fn remove(&self, key: &str) -> impl std::future::Future<Output = ()>;
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStorage = crate::LocalStorage;

#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = crate::FileStorage;

#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformStorage = crate::MemoryStorage;

/// Storage backend appropriate for the current target.
///
/// - **Web** (WASM + `web` feature): `window.localStorage`
/// - **Native**: files under `<data_dir>/marketplace/session/`
/// - **WASM without `web`**: in-memory only
pub fn platform_storage() -> PlatformStorage {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        crate::LocalStorage::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("marketplace")
            .join("session");
        crate::FileStorage::new(base)
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        crate::MemoryStorage::new()
    }
}
