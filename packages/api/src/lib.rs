//! # API crate — typed client for the marketplace REST API
//!
//! Every page of the web shell talks to the backend through [`ApiClient`]. The client
//! owns a [`Transport`] and a handle to the [`store::SessionStore`]; it attaches the
//! access token to private endpoints and recovers once from an expired token by
//! calling `token/refresh/` (see [`client`]).
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: credential attachment, one-shot refresh-and-retry, login/logout/registration |
//! | [`transport`] | [`Transport`] seam, owned request/response types, `reqwest` implementation |
//! | [`endpoints`] | Endpoint paths, public allow-list, path builders |
//! | [`models`] | Wire payloads (auth, catalog, orders, dashboard) |
//! | [`config`] | [`ClientConfig`]: API base URL from env or `marketplace.toml` |
//! | [`error`] | [`ApiError`] and [`TransportError`] |
//!
//! Typed resource calls are `impl` blocks on [`ApiClient`] split by area:
//! catalog reads (`list_products`, `get_product`, `list_categories`), customer calls
//! (`cart`, `add_to_cart`, `orders`, `place_order`, `cancel_order`, `addresses`, ...)
//! and vendor calls (`vendor_products`, `update_order_status`, `dashboard`, product
//! images, ...).

mod catalog;
pub mod client;
pub mod config;
mod customer;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod transport;
mod vendor;

pub use client::{ApiClient, PendingRequest};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, TransportError};
pub use transport::{
    FormField, HttpRequest, HttpResponse, Method, ReqwestTransport, RequestBody, Transport,
};
