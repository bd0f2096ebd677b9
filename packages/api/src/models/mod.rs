//! # Wire models
//!
//! Request and response payloads for the marketplace REST API. The client does
//! not interpret most of these beyond decoding them; prices in particular are
//! carried as [`Amount`] strings exactly as the server formatted them.
//!
//! | Module | Payloads |
//! |--------|----------|
//! | [`auth`] | login, token refresh, registration |
//! | [`catalog`] | products, categories, product images, pagination |
//! | [`orders`] | cart, orders, addresses, order status |
//! | [`dashboard`] | vendor dashboard aggregates |

pub mod auth;
pub mod catalog;
pub mod dashboard;
pub mod orders;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

pub use auth::{
    Credentials, CustomerRegistration, LoginResponse, MessageResponse, RefreshRequest,
    RefreshResponse, VendorRegistration,
};
pub use catalog::{
    Category, ImageFile, Page, ProductDetail, ProductImage, ProductInput, ProductQuery, ProductSummary,
    VendorInfo, VendorProduct,
};
pub use dashboard::{DashboardStats, VendorDashboard};
pub use orders::{
    AddToCart, Address, Cart, CartItem, NewAddress, Order, OrderItemRequest, OrderLine,
    OrderStatus, PlaceOrder, StatusUpdate, StatusUpdated, VendorOrderLine,
};

/// Monetary amount as formatted by the server.
///
/// Decimal fields arrive as strings (`"249.00"`) while computed totals arrive as
/// JSON numbers; both are normalised to their textual form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Amount(pub String);

impl Amount {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Amount(s),
            Raw::Number(n) => Amount(n.to_string()),
        })
    }
}
