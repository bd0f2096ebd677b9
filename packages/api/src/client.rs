//! # Authenticated request client
//!
//! [`ApiClient`] is the single outbound path to the marketplace API. Every call
//! becomes a [`PendingRequest`] and goes through [`ApiClient::request`]:
//!
//! 1. If the path is not on the public allow-list and the session holds an access
//!    token, the request carries `Authorization: Bearer <token>`. Public paths never
//!    carry it.
//! 2. A `401` on a private request that has not been retried yet triggers recovery:
//!    with no refresh token the call fails with [`ApiError::Unauthenticated`];
//!    otherwise `token/refresh/` is called without credentials. On success the new
//!    access token is stored and the original request is sent once more. On failure
//!    the session is cleared and the call fails with [`ApiError::SessionExpired`].
//! 3. The retried request is never recovered again; a second `401` is final.
//! 4. Everything else (4xx, 5xx, network errors) is returned as is.
//!
//! Refreshes are serialised by a gate. A handler that reaches the gate after another
//! handler already rotated the token reuses that token instead of refreshing again,
//! so a burst of concurrent `401`s produces one refresh call.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use store::{PlatformStorage, SessionStorage, SessionStore, UserIdentity};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::endpoints;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    Credentials, CustomerRegistration, LoginResponse, MessageResponse, RefreshRequest,
    RefreshResponse, VendorRegistration,
};
use crate::transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, RequestBody, Transport};

const UNAUTHORIZED: u16 = 401;

/// A request on its way through the client.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingRequest {
    pub method: Method,
    pub endpoint: String,
    pub body: Option<RequestBody>,
    /// Derived from [`endpoints::is_public`].
    pub is_public: bool,
    /// Set once the request has been re-sent after a refresh.
    pub retried: bool,
}

impl PendingRequest {
    pub fn new(method: Method, endpoint: &str, body: Option<RequestBody>) -> Self {
        Self {
            method,
            endpoint: endpoint.to_string(),
            body,
            is_public: endpoints::is_public(endpoint),
            retried: false,
        }
    }
}

/// Shared handle to the transport and the session store.
pub struct ApiClient<T = ReqwestTransport, S = PlatformStorage> {
    inner: Arc<Inner<T, S>>,
}

struct Inner<T, S> {
    transport: T,
    session: SessionStore<S>,
    refresh_gate: Mutex<()>,
}

impl<T, S> Clone for ApiClient<T, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, S> PartialEq for ApiClient<T, S> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<S: SessionStorage> ApiClient<ReqwestTransport, S> {
    /// Client talking HTTP to the API described by `config`.
    pub fn from_config(config: ClientConfig, session: SessionStore<S>) -> Self {
        Self::new(ReqwestTransport::new(config), session)
    }
}

impl<T: Transport, S: SessionStorage> ApiClient<T, S> {
    pub fn new(transport: T, session: SessionStore<S>) -> Self {
        Self {
            inner: Arc::new(Inner {
                transport,
                session,
                refresh_gate: Mutex::new(()),
            }),
        }
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.inner.session
    }

    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    /// Send a request, attaching credentials and recovering once from an expired token.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<RequestBody>,
    ) -> ApiResult<HttpResponse> {
        let mut pending = PendingRequest::new(method, path, body);
        let mut bearer = self.credentials_for(&pending);
        loop {
            let response = self.dispatch(&pending, bearer.clone()).await?;
            if response.status != UNAUTHORIZED || pending.is_public || pending.retried {
                return response.into_result();
            }
            pending.retried = true;
            let token = self.recover(bearer.as_deref()).await?;
            debug!(method = %pending.method, path = %pending.endpoint, "retrying with refreshed token");
            bearer = Some(token);
        }
    }

    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        self.request(Method::GET, path, None).await?.json()
    }

    pub async fn post<B, R>(&self, path: &str, body: &B) -> ApiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(json_body(body)?))
            .await?
            .json()
    }

    pub async fn put<B, R>(&self, path: &str, body: &B) -> ApiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(Method::PUT, path, Some(json_body(body)?))
            .await?
            .json()
    }

    pub async fn patch<B, R>(&self, path: &str, body: &B) -> ApiResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(Method::PATCH, path, Some(json_body(body)?))
            .await?
            .json()
    }

    /// `DELETE`, ignoring whatever body the server sends back.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.request(Method::DELETE, path, None).await?;
        Ok(())
    }

    /// Exchange credentials for tokens and store the resulting session.
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<UserIdentity> {
        let response: LoginResponse = self.post(endpoints::LOGIN, credentials).await?;
        let grant = response
            .into_grant()
            .map_err(|e| ApiError::UnknownRole(e.0))?;
        let user = grant.user.clone();
        self.inner.session.save(grant).await;
        info!(user = %user.username, role = %user.role, "logged in");
        Ok(user)
    }

    /// Drop the session. The API has no server-side logout.
    pub async fn logout(&self) {
        self.inner.session.clear().await;
        info!("logged out");
    }

    pub async fn register_customer(
        &self,
        registration: &CustomerRegistration,
    ) -> ApiResult<MessageResponse> {
        self.post(endpoints::REGISTER_CUSTOMER, registration).await
    }

    pub async fn register_vendor(
        &self,
        registration: &VendorRegistration,
    ) -> ApiResult<MessageResponse> {
        self.post(endpoints::REGISTER_VENDOR, registration).await
    }

    fn credentials_for(&self, pending: &PendingRequest) -> Option<String> {
        if pending.is_public {
            return None;
        }
        self.inner
            .session
            .current()
            .access_token()
            .map(str::to_string)
    }

    async fn dispatch(
        &self,
        pending: &PendingRequest,
        bearer: Option<String>,
    ) -> ApiResult<HttpResponse> {
        let request = HttpRequest {
            method: pending.method.clone(),
            path: pending.endpoint.clone(),
            bearer,
            body: pending.body.clone(),
        };
        debug!(
            method = %request.method,
            path = %request.path,
            authenticated = request.bearer.is_some(),
            retried = pending.retried,
            "sending request"
        );
        let response = self.inner.transport.send(&request).await?;
        debug!(path = %request.path, status = response.status, "response received");
        Ok(response)
    }

    /// Obtain a usable access token after `rejected` got a 401.
    async fn recover(&self, rejected: Option<&str>) -> ApiResult<String> {
        let _gate = self.inner.refresh_gate.lock().await;

        let state = self.inner.session.current();
        let Some(session) = state.session() else {
            debug!("401 without an active session");
            return Err(ApiError::Unauthenticated);
        };
        if rejected != Some(session.access_token.as_str()) {
            debug!("access token already replaced, reusing it");
            return Ok(session.access_token.clone());
        }
        let Some(refresh) = session.refresh_token.clone() else {
            debug!("401 and no refresh token held");
            return Err(ApiError::Unauthenticated);
        };

        match self.refresh(refresh.clone()).await {
            Ok(tokens) => {
                let access = tokens.access.clone();
                if self
                    .inner
                    .session
                    .replace_access_token(&refresh, tokens.access, tokens.refresh)
                    .await
                {
                    info!("access token refreshed");
                    Ok(access)
                } else {
                    // Logged out, or someone else logged in, while the refresh was in flight.
                    Err(ApiError::Unauthenticated)
                }
            }
            Err(e) => {
                warn!(error = %e, "token refresh failed, clearing session");
                if self.inner.session.clear_if_holding(&refresh).await {
                    Err(ApiError::SessionExpired)
                } else {
                    Err(ApiError::Unauthenticated)
                }
            }
        }
    }

    /// Call `token/refresh/` on an unauthenticated channel.
    async fn refresh(&self, refresh: String) -> ApiResult<RefreshResponse> {
        let request = HttpRequest {
            method: Method::POST,
            path: endpoints::TOKEN_REFRESH.to_string(),
            bearer: None,
            body: Some(json_body(&RefreshRequest { refresh })?),
        };
        let response = self.inner.transport.send(&request).await?;
        response.into_result()?.json()
    }
}

fn json_body<B: Serialize + ?Sized>(body: &B) -> ApiResult<RequestBody> {
    serde_json::to_value(body)
        .map(RequestBody::Json)
        .map_err(|e| ApiError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests;
