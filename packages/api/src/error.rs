//! Client error types.

use serde_json::Value;
use thiserror::Error;

/// Convenience alias for client return types.
pub type ApiResult<T> = Result<T, ApiError>;

/// Every way a call through [`crate::ApiClient`] can fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// No usable credentials for a private endpoint, or the single retry was
    /// rejected again. The page should send the user to the login entry point.
    #[error("Authentication required")]
    Unauthenticated,

    /// The refresh token was rejected; the session has been cleared.
    #[error("Session expired, please log in again")]
    SessionExpired,

    /// 4xx response (other than 401). `body` is the server payload, untouched.
    #[error("Request rejected ({status}): {body}")]
    Validation { status: u16, body: String },

    /// 5xx or otherwise unexpected status.
    #[error("Server error ({status})")]
    Server { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Could not encode request: {0}")]
    Encode(String),

    /// Login succeeded server-side but the account is neither customer nor vendor.
    #[error("Unsupported account role: {0}")]
    UnknownRole(String),
}

impl ApiError {
    /// Whether the page should navigate to the login entry point.
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::Unauthenticated | ApiError::SessionExpired)
    }

    /// Build the error for a non-success status.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => ApiError::Unauthenticated,
            400..=499 => ApiError::Validation { status, body },
            _ => ApiError::Server { status, body },
        }
    }

    /// Human-readable text for display.
    ///
    /// For validation errors this digs the first message out of the usual
    /// payload shapes: `{"detail": ".."}`, `{"error": ".."}`,
    /// `{"field": [".."]}` or `{"non_field_errors": [".."]}`.
    pub fn message(&self) -> String {
        match self {
            ApiError::Validation { body, .. } => {
                extract_message(body).unwrap_or_else(|| self.to_string())
            }
            other => other.to_string(),
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    first_message(&value)
}

fn first_message(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(first_message),
        Value::Object(map) => {
            for key in ["detail", "error", "message"] {
                if let Some(found) = map.get(key).and_then(first_message) {
                    return Some(found);
                }
            }
            map.iter().find_map(|(field, v)| {
                let msg = first_message(v)?;
                if field == "non_field_errors" {
                    Some(msg)
                } else {
                    Some(format!("{field}: {msg}"))
                }
            })
        }
        _ => None,
    }
}

/// Failure below HTTP: connection refused, DNS, TLS, aborted body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        ApiError::Network(e.0)
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError(e.to_string())
    }
}
