//! Cart, order and address payloads.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::catalog::{ProductDetail, ProductSummary};
use super::Amount;

/// Lifecycle of an order line.
///
/// Serialized in upper case. `DELIVERED` is the canonical spelling; the legacy
/// `DELIVERD` is accepted when reading so older records still decode. Lower-case
/// order-level values (`pending`, `shipped`, ...) are accepted as well.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[serde(alias = "placed")]
    Placed,
    #[serde(alias = "pending")]
    Pending,
    #[serde(alias = "processing")]
    Processing,
    #[serde(alias = "accepted")]
    Accepted,
    #[serde(alias = "packed")]
    Packed,
    #[serde(alias = "shipped")]
    Shipped,
    /// Sent as `DELIVERED`. A backend whose status whitelist only spells it
    /// `DELIVERD` rejects this with a 400 until that whitelist is corrected.
    #[serde(alias = "DELIVERD", alias = "delivered")]
    Delivered,
    #[serde(alias = "cancelled")]
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "PLACED",
            OrderStatus::Pending => "PENDING",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Accepted => "ACCEPTED",
            OrderStatus::Packed => "PACKED",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// Next status in the vendor fulfilment workflow
    /// PLACED → ACCEPTED → PACKED → SHIPPED → DELIVERED.
    pub fn next_fulfilment_step(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Placed | OrderStatus::Pending => Some(OrderStatus::Accepted),
            OrderStatus::Accepted | OrderStatus::Processing => Some(OrderStatus::Packed),
            OrderStatus::Packed => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// Customers may cancel only orders nobody has acted on yet.
    pub fn is_cancellable(&self) -> bool {
        matches!(self, OrderStatus::Placed)
    }

    /// Vendors may cancel a line at any point before it is delivered.
    pub fn vendor_can_cancel(&self) -> bool {
        !self.is_final()
    }

    pub fn is_final(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub line: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NewAddress {
    pub line: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub is_default: bool,
}

impl NewAddress {
    /// Every field is required by the server.
    pub fn is_complete(&self) -> bool {
        [&self.line, &self.city, &self.state, &self.pincode]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct CartItem {
    pub id: i64,
    pub product: ProductDetail,
    pub quantity: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Cart {
    pub id: i64,
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub total_price: Amount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AddToCart {
    pub product_id: i64,
    pub quantity: u32,
}

/// One product line inside a customer order.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct OrderLine {
    pub id: i64,
    #[serde(default)]
    pub order_id: Option<i64>,
    pub product: ProductSummary,
    pub quantity: u32,
    pub price: Amount,
    #[serde(default)]
    pub subtotal: Option<Amount>,
    pub status: OrderStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub address: Option<Address>,
    pub status: OrderStatus,
    pub total_amount: Amount,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderLine>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrderItemRequest {
    pub product_id: i64,
    pub quantity: u32,
}

/// Body of `POST customer/orders/`.
///
/// Without `items` the server checks out the whole cart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlaceOrder {
    pub address_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItemRequest>>,
}

impl PlaceOrder {
    pub fn from_cart(address_id: i64) -> Self {
        Self {
            address_id,
            items: None,
        }
    }

    pub fn buy_now(address_id: i64, product_id: i64, quantity: u32) -> Self {
        Self {
            address_id,
            items: Some(vec![OrderItemRequest {
                product_id,
                quantity,
            }]),
        }
    }
}

/// An order line as seen by the vendor who fulfils it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct VendorOrderLine {
    pub id: i64,
    pub order_id: i64,
    /// Product name.
    pub product: String,
    /// Customer username.
    pub customer: String,
    pub quantity: u32,
    pub total_amount: Amount,
    pub status: OrderStatus,
    pub price: Amount,
    #[serde(default)]
    pub image: Option<String>,
}

/// Body of `PATCH vendor/orders/{id}/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct StatusUpdated {
    #[serde(default)]
    pub message: String,
    pub new_status: OrderStatus,
}
