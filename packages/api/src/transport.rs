//! # HTTP transport seam
//!
//! [`crate::ApiClient`] never talks to `reqwest` directly. It builds an owned
//! [`HttpRequest`] (so the single retry can send the same body again) and hands it
//! to a [`Transport`]. [`ReqwestTransport`] is the production implementation;
//! tests substitute a scripted one.

use std::future::Future;

use reqwest::multipart::{Form, Part};
pub use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ApiError, TransportError};

/// Owned request body.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Multipart(Vec<FormField>),
}

/// One field of a multipart form.
#[derive(Clone, Debug, PartialEq)]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

/// Fully resolved outbound request.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Endpoint path relative to the API root, e.g. `customer/cart/`.
    pub path: String,
    /// Access token to send as `Authorization: Bearer ..`, if any.
    pub bearer: Option<String>,
    pub body: Option<RequestBody>,
}

/// Status and raw body of a response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Map a non-success status to an [`ApiError`], passing successes through.
    pub fn into_result(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::from_status(self.status, self.body))
        }
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// Async trait for sending a single HTTP request.
pub trait Transport {
    fn send(
        &self,
        request: &HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>>;
}

/// `reqwest`-backed transport. Works natively and in the browser (fetch).
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ReqwestTransport {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = self.config.endpoint_url(&request.path);
        let mut builder = self.http.request(request.method.clone(), url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match &request.body {
            None => builder,
            Some(RequestBody::Json(value)) => builder.json(value),
            Some(RequestBody::Multipart(fields)) => builder.multipart(build_form(fields)?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

fn build_form(fields: &[FormField]) -> Result<Form, TransportError> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(name.clone(), value.clone()),
            FormField::File {
                name,
                file_name,
                mime,
                bytes,
            } => {
                let part = Part::bytes(bytes.clone())
                    .file_name(file_name.clone())
                    .mime_str(mime)?;
                form.part(name.clone(), part)
            }
        };
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result_maps_status() {
        let ok = HttpResponse {
            status: 204,
            body: String::new(),
        };
        assert!(ok.into_result().is_ok());

        let rejected = HttpResponse {
            status: 400,
            body: r#"{"detail":"nope"}"#.to_string(),
        };
        assert_eq!(
            rejected.into_result(),
            Err(ApiError::Validation {
                status: 400,
                body: r#"{"detail":"nope"}"#.to_string()
            })
        );
    }

    #[test]
    fn test_json_decode_error() {
        let response = HttpResponse {
            status: 200,
            body: "not json".to_string(),
        };
        assert!(matches!(
            response.json::<Value>(),
            Err(ApiError::Decode(_))
        ));
    }
}
