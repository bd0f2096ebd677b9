//! This crate contains all shared UI for the workspace.

mod client;
pub use client::{make_client, MarketClient};

mod auth;
pub use auth::{use_api, use_auth, AuthProvider, ErrorNotice, LogoutButton};

mod guard;
pub use guard::Protected;

mod navbar;
pub use navbar::Navbar;
