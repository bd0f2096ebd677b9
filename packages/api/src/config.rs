//! Client configuration from the environment or a `marketplace.toml` file.
//!
//! [`ClientConfig::load`] is what shells call; the other constructors are its parts.

use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Where the marketplace REST API lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin of the backend, without the `/api/` suffix.
    pub base_url: String,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    api: ApiSection,
}

#[derive(Debug, Default, Deserialize)]
struct ApiSection {
    base_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve the configuration for this process.
    ///
    /// `API_URL` wins. Native builds then fall back to [`filename`](Self::filename)
    /// in the working directory, and finally to [`DEFAULT_BASE_URL`].
    pub fn load() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            dotenvy::dotenv().ok();
            match env_url() {
                Some(url) => Self::new(url),
                None => Self::from_file(std::path::Path::new(Self::filename()))
                    .unwrap_or_default(),
            }
        }
        #[cfg(target_arch = "wasm32")]
        {
            Self::from_env()
        }
    }

    /// Read `API_URL`, falling back to [`DEFAULT_BASE_URL`].
    ///
    /// Native builds load `.env` first. Browser builds have no process
    /// environment, so the value is baked in at compile time.
    pub fn from_env() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            dotenvy::dotenv().ok();
            env_url().map(Self::new).unwrap_or_default()
        }
        #[cfg(target_arch = "wasm32")]
        {
            match option_env!("API_URL") {
                Some(url) if !url.trim().is_empty() => Self::new(url),
                _ => Self::default(),
            }
        }
    }

    /// Parse a TOML document of the form `[api] base_url = "..."`.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        let file: ConfigFile = toml::from_str(s)?;
        Ok(match file.api.base_url {
            Some(url) => Self::new(url),
            None => Self::default(),
        })
    }

    /// Load a config file. `None` when it is missing or unreadable.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &std::path::Path) -> Option<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read config file");
                return None;
            }
        };
        match Self::from_toml(&raw) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring malformed config file");
                None
            }
        }
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "marketplace.toml"
    }

    /// Root every endpoint path is joined onto: `<base_url>/api/`.
    pub fn api_root(&self) -> String {
        format!("{}/api/", self.base_url)
    }

    /// Absolute URL of an endpoint path such as `customer/cart/`.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", self.api_root(), path.trim_start_matches('/'))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn env_url() -> Option<String> {
    std::env::var("API_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
}
