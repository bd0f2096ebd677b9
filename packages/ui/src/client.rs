//! Shared client constructor for all platforms.
//!
//! The session is persisted by [`store::PlatformStorage`]:
//! - **Web** (WASM + `web` feature): `window.localStorage`
//! - **Native**: one file per entry under the platform data directory

use api::{ApiClient, ClientConfig, ReqwestTransport};
use store::{PlatformStorage, SessionStore};

/// The client type every page works with.
pub type MarketClient = ApiClient<ReqwestTransport, PlatformStorage>;

/// Create a client for the configured API with a fresh, not yet hydrated, session.
pub fn make_client() -> MarketClient {
    let config = ClientConfig::load();
    tracing::debug!(api = %config.api_root(), "creating API client");
    let session = SessionStore::init(store::platform_storage());
    ApiClient::from_config(config, session)
}
