use std::sync::{Arc, Mutex};

use serde_json::json;
use store::{evaluate, GuardDecision, MemoryStorage, Role, SessionGrant, SessionState, UserIdentity};

use super::*;
use crate::error::TransportError;
use crate::models::Cart;
use crate::transport::FormField;

type Responder = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse, TransportError>>;

/// Transport that records every request and answers from a closure.
struct ScriptedTransport {
    sent: Arc<Mutex<Vec<HttpRequest>>>,
    responder: Responder,
}

impl ScriptedTransport {
    fn new(
        responder: impl Fn(&HttpRequest) -> Result<HttpResponse, TransportError> + 'static,
    ) -> (Self, Arc<Mutex<Vec<HttpRequest>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let transport = Self {
            sent: Arc::clone(&sent),
            responder: Box::new(responder),
        };
        (transport, sent)
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.lock().unwrap().push(request.clone());
        // Let concurrently polled requests reach the server before anyone answers.
        tokio::task::yield_now().await;
        (self.responder)(request)
    }
}

fn reply(status: u16, body: serde_json::Value) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse {
        status,
        body: body.to_string(),
    })
}

fn empty_cart() -> serde_json::Value {
    json!({ "id": 1, "items": [], "total_price": 0 })
}

fn customer() -> UserIdentity {
    UserIdentity {
        id: 7,
        username: "neha".into(),
        role: Role::Customer,
    }
}

async fn logged_in_store(access: &str, refresh: &str) -> (SessionStore<MemoryStorage>, MemoryStorage) {
    let storage = MemoryStorage::new();
    let store = SessionStore::init(storage.clone());
    store.hydrate().await;
    store
        .save(SessionGrant {
            access_token: access.into(),
            refresh_token: refresh.into(),
            user: customer(),
        })
        .await;
    (store, storage)
}

fn refresh_calls(sent: &Arc<Mutex<Vec<HttpRequest>>>) -> usize {
    sent.lock()
        .unwrap()
        .iter()
        .filter(|r| r.path == endpoints::TOKEN_REFRESH)
        .count()
}

#[tokio::test]
async fn test_public_request_carries_no_credentials() {
    let (store, _) = logged_in_store("a1", "r1").await;
    let (transport, sent) = ScriptedTransport::new(|_| {
        reply(200, json!({ "count": 0, "next": null, "previous": null, "results": [] }))
    });
    let client = ApiClient::new(transport, store);

    let _: serde_json::Value = client.get("products/?page=1").await.unwrap();
    let _: serde_json::Value = client.get("/categories/").await.unwrap();

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().all(|r| r.bearer.is_none()));
}

#[tokio::test]
async fn test_private_request_carries_bearer() {
    let (store, _) = logged_in_store("a1", "r1").await;
    let (transport, sent) = ScriptedTransport::new(|_| reply(200, empty_cart()));
    let client = ApiClient::new(transport, store);

    let cart: Cart = client.get(endpoints::CART).await.unwrap();
    assert!(cart.items.is_empty());
    assert_eq!(sent.lock().unwrap()[0].bearer.as_deref(), Some("a1"));
}

#[tokio::test]
async fn test_private_request_without_session_has_no_header() {
    let store = SessionStore::init(MemoryStorage::new());
    store.hydrate().await;
    let (transport, sent) = ScriptedTransport::new(|_| reply(401, json!({ "detail": "no" })));
    let client = ApiClient::new(transport, store);

    let result: ApiResult<Cart> = client.get(endpoints::CART).await;
    assert_eq!(result, Err(ApiError::Unauthenticated));
    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].bearer.is_none());
}

#[tokio::test]
async fn test_expired_token_refreshes_once_and_retries() {
    let (store, storage) = logged_in_store("old", "r1").await;
    let (transport, sent) = ScriptedTransport::new(|req| match req.path.as_str() {
        endpoints::TOKEN_REFRESH => {
            assert!(req.bearer.is_none());
            assert_eq!(req.body, Some(RequestBody::Json(json!({ "refresh": "r1" }))));
            reply(200, json!({ "access": "new" }))
        }
        _ if req.bearer.as_deref() == Some("new") => reply(200, empty_cart()),
        _ => reply(401, json!({ "detail": "Token is expired" })),
    });
    let client = ApiClient::new(transport, store.clone());

    let cart: Cart = client.get(endpoints::CART).await.unwrap();
    assert_eq!(cart.id, 1);

    let sent = sent.lock().unwrap();
    let paths: Vec<_> = sent.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["customer/cart/", "token/refresh/", "customer/cart/"]);
    assert_eq!(sent[2].bearer.as_deref(), Some("new"));

    assert_eq!(store.current().access_token(), Some("new"));
    assert_eq!(store.current().refresh_token(), Some("r1"));
    assert_eq!(storage.get("access_token").await.as_deref(), Some("new"));
}

#[tokio::test]
async fn test_rotated_refresh_token_is_stored() {
    let (store, storage) = logged_in_store("old", "r1").await;
    let (transport, _) = ScriptedTransport::new(|req| match req.path.as_str() {
        endpoints::TOKEN_REFRESH => reply(200, json!({ "access": "new", "refresh": "r2" })),
        _ if req.bearer.as_deref() == Some("new") => reply(200, empty_cart()),
        _ => reply(401, json!({})),
    });
    let client = ApiClient::new(transport, store.clone());

    let _: Cart = client.get(endpoints::CART).await.unwrap();
    assert_eq!(store.current().refresh_token(), Some("r2"));
    assert_eq!(storage.get("refresh_token").await.as_deref(), Some("r2"));
}

#[tokio::test]
async fn test_missing_refresh_token_fails_without_refresh_call() {
    let storage = MemoryStorage::new();
    storage.set("access_token", "old").await;
    storage
        .set("user", r#"{"id":7,"username":"neha","role":"customer"}"#)
        .await;
    let store = SessionStore::init(storage.clone());
    store.hydrate().await;
    assert!(store.current().session().is_some());

    let (transport, sent) = ScriptedTransport::new(|_| reply(401, json!({})));
    let client = ApiClient::new(transport, store);

    let result: ApiResult<Cart> = client.get(endpoints::CART).await;
    assert_eq!(result, Err(ApiError::Unauthenticated));
    assert_eq!(refresh_calls(&sent), 0);
    assert_eq!(sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_rejected_refresh_clears_session() {
    let (store, storage) = logged_in_store("old", "r1").await;
    let (transport, sent) = ScriptedTransport::new(|req| match req.path.as_str() {
        endpoints::TOKEN_REFRESH => reply(401, json!({ "detail": "Token is invalid or expired" })),
        _ => reply(401, json!({})),
    });
    let client = ApiClient::new(transport, store.clone());

    let result: ApiResult<Cart> = client.get(endpoints::CART).await;
    assert_eq!(result, Err(ApiError::SessionExpired));
    assert_eq!(store.current(), SessionState::Anonymous);
    assert!(storage.is_empty());
    assert_eq!(refresh_calls(&sent), 1);
    // The original request is not re-sent after a failed refresh.
    assert_eq!(sent.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_refresh_network_failure_clears_session() {
    let (store, storage) = logged_in_store("old", "r1").await;
    let (transport, _) = ScriptedTransport::new(|req| match req.path.as_str() {
        endpoints::TOKEN_REFRESH => Err(TransportError("connection refused".into())),
        _ => reply(401, json!({})),
    });
    let client = ApiClient::new(transport, store.clone());

    let result: ApiResult<Cart> = client.get(endpoints::CART).await;
    assert_eq!(result, Err(ApiError::SessionExpired));
    assert!(storage.is_empty());
}

/// Transport that logs a different user in while the refresh call is in flight.
struct LoginDuringRefresh {
    store: SessionStore<MemoryStorage>,
    refresh_ok: bool,
}

impl Transport for LoginDuringRefresh {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        if request.path != endpoints::TOKEN_REFRESH {
            return reply(401, json!({}));
        }
        self.store
            .save(SessionGrant {
                access_token: "b-access".into(),
                refresh_token: "b-refresh".into(),
                user: UserIdentity {
                    id: 9,
                    username: "bilal".into(),
                    role: Role::Vendor,
                },
            })
            .await;
        if self.refresh_ok {
            reply(200, json!({ "access": "a-new" }))
        } else {
            reply(401, json!({ "detail": "Token is invalid or expired" }))
        }
    }
}

#[tokio::test]
async fn test_refreshed_token_not_applied_to_newer_login() {
    let (store, storage) = logged_in_store("a-old", "a-refresh").await;
    let transport = LoginDuringRefresh {
        store: store.clone(),
        refresh_ok: true,
    };
    let client = ApiClient::new(transport, store.clone());

    let result: ApiResult<Cart> = client.get(endpoints::CART).await;
    assert_eq!(result, Err(ApiError::Unauthenticated));

    let state = store.current();
    assert_eq!(state.user().map(|u| u.username.as_str()), Some("bilal"));
    assert_eq!(state.access_token(), Some("b-access"));
    assert_eq!(state.refresh_token(), Some("b-refresh"));
    assert_eq!(storage.get("access_token").await.as_deref(), Some("b-access"));
}

#[tokio::test]
async fn test_failed_refresh_keeps_newer_login() {
    let (store, storage) = logged_in_store("a-old", "a-refresh").await;
    let transport = LoginDuringRefresh {
        store: store.clone(),
        refresh_ok: false,
    };
    let client = ApiClient::new(transport, store.clone());

    let result: ApiResult<Cart> = client.get(endpoints::CART).await;
    assert_eq!(result, Err(ApiError::Unauthenticated));
    assert_eq!(store.current().access_token(), Some("b-access"));
    assert_eq!(storage.len(), 3);
}

#[tokio::test]
async fn test_second_unauthorized_is_final() {
    let (store, _) = logged_in_store("old", "r1").await;
    let (transport, sent) = ScriptedTransport::new(|req| match req.path.as_str() {
        endpoints::TOKEN_REFRESH => reply(200, json!({ "access": "new" })),
        _ => reply(401, json!({ "detail": "still no" })),
    });
    let client = ApiClient::new(transport, store.clone());

    let result: ApiResult<Cart> = client.get(endpoints::CART).await;
    assert_eq!(result, Err(ApiError::Unauthenticated));
    assert_eq!(refresh_calls(&sent), 1);
    assert_eq!(sent.lock().unwrap().len(), 3);
    // The refreshed session is kept; only the request failed.
    assert_eq!(store.current().access_token(), Some("new"));
}

#[tokio::test]
async fn test_other_errors_pass_through_without_refresh() {
    let (store, _) = logged_in_store("a1", "r1").await;
    let (transport, sent) = ScriptedTransport::new(|req| match req.path.as_str() {
        "customer/orders/3/" => reply(400, json!({ "detail": "only placed orders can be cancelled." })),
        "customer/orders/" => reply(500, json!({ "error": "boom" })),
        _ => Err(TransportError("offline".into())),
    });
    let client = ApiClient::new(transport, store);

    let err = client.cancel_order(3).await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Validation {
            status: 400,
            body: json!({ "detail": "only placed orders can be cancelled." }).to_string(),
        }
    );
    assert_eq!(err.message(), "only placed orders can be cancelled.");

    let err = client.get::<serde_json::Value>("customer/orders/").await.unwrap_err();
    assert!(matches!(err, ApiError::Server { status: 500, .. }));

    let err = client.get::<serde_json::Value>("customer/addresses/").await.unwrap_err();
    assert_eq!(err, ApiError::Network("offline".into()));

    assert_eq!(refresh_calls(&sent), 0);
    assert_eq!(sent.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_public_unauthorized_does_not_refresh() {
    let (store, _) = logged_in_store("a1", "r1").await;
    let (transport, sent) = ScriptedTransport::new(|_| {
        reply(401, json!({ "non_field_errors": ["Invalid Username or Password"] }))
    });
    let client = ApiClient::new(transport, store.clone());

    let result = client.login(&Credentials::new("neha", "wrong")).await;
    assert_eq!(result, Err(ApiError::Unauthenticated));
    assert_eq!(refresh_calls(&sent), 0);
    assert_eq!(store.current().access_token(), Some("a1"));
}

#[tokio::test]
async fn test_login_stores_session() {
    let storage = MemoryStorage::new();
    let store = SessionStore::init(storage.clone());
    store.hydrate().await;
    let (transport, sent) = ScriptedTransport::new(|req| {
        assert_eq!(req.path, endpoints::LOGIN);
        assert!(req.bearer.is_none());
        reply(
            200,
            json!({ "refresh": "r1", "access": "a1", "user_role": "vendor", "username": "ravi", "id": 3 }),
        )
    });
    let client = ApiClient::new(transport, store.clone());

    let user = client.login(&Credentials::new("ravi", "secret")).await.unwrap();
    assert_eq!(user.role, Role::Vendor);
    assert_eq!(
        sent.lock().unwrap()[0].body,
        Some(RequestBody::Json(json!({ "username": "ravi", "password": "secret" })))
    );

    assert_eq!(store.current().user(), Some(&user));
    assert_eq!(storage.get("access_token").await.as_deref(), Some("a1"));
    assert_eq!(storage.get("refresh_token").await.as_deref(), Some("r1"));
    let stored: UserIdentity =
        serde_json::from_str(&storage.get("user").await.unwrap()).unwrap();
    assert_eq!(stored, user);
}

#[tokio::test]
async fn test_login_with_unknown_role_creates_no_session() {
    let storage = MemoryStorage::new();
    let store = SessionStore::init(storage.clone());
    store.hydrate().await;
    let (transport, _) = ScriptedTransport::new(|_| {
        reply(
            200,
            json!({ "refresh": "r1", "access": "a1", "user_role": "unknown", "username": "root", "id": 1 }),
        )
    });
    let client = ApiClient::new(transport, store.clone());

    let result = client.login(&Credentials::new("root", "pw")).await;
    assert_eq!(result, Err(ApiError::UnknownRole("unknown".into())));
    assert_eq!(store.current(), SessionState::Anonymous);
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_logout_clears_session_and_guard_redirects() {
    let (store, storage) = logged_in_store("a1", "r1").await;
    assert_eq!(storage.len(), 3);
    let (transport, sent) = ScriptedTransport::new(|_| reply(200, json!({})));
    let client = ApiClient::new(transport, store.clone());

    client.logout().await;

    assert!(sent.lock().unwrap().is_empty());
    assert!(storage.is_empty());
    assert_eq!(
        evaluate(&store.current(), Some(Role::Customer), "/cart"),
        GuardDecision::RedirectToLogin {
            to: "/login?next=%2Fcart".into()
        }
    );
}

#[tokio::test]
async fn test_concurrent_unauthorized_share_one_refresh() {
    let (store, _) = logged_in_store("old", "r1").await;
    let (transport, sent) = ScriptedTransport::new(|req| match req.path.as_str() {
        endpoints::TOKEN_REFRESH => reply(200, json!({ "access": "new" })),
        _ if req.bearer.as_deref() == Some("new") => reply(200, empty_cart()),
        _ => reply(401, json!({})),
    });
    let client = ApiClient::new(transport, store);

    let (cart, orders) = tokio::join!(
        client.get::<Cart>(endpoints::CART),
        client.get::<serde_json::Value>(endpoints::ORDERS),
    );
    assert!(cart.is_ok());
    assert!(orders.is_ok());
    assert_eq!(refresh_calls(&sent), 1);

    let sent = sent.lock().unwrap();
    let retried: Vec<_> = sent
        .iter()
        .filter(|r| r.bearer.as_deref() == Some("new"))
        .map(|r| r.path.as_str())
        .collect();
    assert_eq!(retried.len(), 2);
}

#[tokio::test]
async fn test_multipart_body_is_resent_on_retry() {
    let (store, _) = logged_in_store("old", "r1").await;
    let (transport, sent) = ScriptedTransport::new(|req| match req.path.as_str() {
        endpoints::TOKEN_REFRESH => reply(200, json!({ "access": "new" })),
        _ if req.bearer.as_deref() == Some("new") => {
            reply(201, json!({ "id": 4, "product": 9, "image": "http://x/p.png", "is_primary": false }))
        }
        _ => reply(401, json!({})),
    });
    let client = ApiClient::new(transport, store);

    let form = vec![
        FormField::Text {
            name: "product".into(),
            value: "9".into(),
        },
        FormField::File {
            name: "image".into(),
            file_name: "p.png".into(),
            mime: "image/png".into(),
            bytes: vec![0x89, 0x50, 0x4e, 0x47],
        },
    ];
    client
        .request(Method::POST, endpoints::PRODUCT_IMAGES, Some(RequestBody::Multipart(form.clone())))
        .await
        .unwrap();

    let sent = sent.lock().unwrap();
    let uploads: Vec<_> = sent
        .iter()
        .filter(|r| r.path == endpoints::PRODUCT_IMAGES)
        .collect();
    assert_eq!(uploads.len(), 2);
    assert_eq!(uploads[0].body, uploads[1].body);
    assert_eq!(uploads[1].body, Some(RequestBody::Multipart(form)));
}

#[test]
fn test_pending_request_classifies_paths() {
    let public = PendingRequest::new(Method::GET, "/products/kettle/", None);
    assert!(public.is_public);
    assert!(!public.retried);

    let private = PendingRequest::new(Method::GET, "vendor/products/", None);
    assert!(!private.is_public);
}
