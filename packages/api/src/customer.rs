//! Customer area: cart, orders and delivery addresses.

use store::SessionStorage;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiResult;
use crate::models::{
    AddToCart, Address, Cart, CartItem, MessageResponse, NewAddress, Order, OrderLine, PlaceOrder,
};
use crate::transport::{Method, Transport};

impl<T: Transport, S: SessionStorage> ApiClient<T, S> {
    /// The customer's cart; the server creates an empty one on first access.
    pub async fn cart(&self) -> ApiResult<Cart> {
        self.get(endpoints::CART).await
    }

    /// Add `quantity` of a product. An existing line for the same product is topped up.
    pub async fn add_to_cart(&self, product_id: i64, quantity: u32) -> ApiResult<CartItem> {
        self.post(
            endpoints::CART,
            &AddToCart {
                product_id,
                quantity,
            },
        )
        .await
    }

    pub async fn remove_cart_item(&self, item_id: i64) -> ApiResult<()> {
        self.delete(&endpoints::cart_item(item_id)).await
    }

    /// Every order line the customer has bought, newest first.
    pub async fn orders(&self) -> ApiResult<Vec<OrderLine>> {
        self.get(endpoints::ORDERS).await
    }

    pub async fn place_order(&self, order: &PlaceOrder) -> ApiResult<Order> {
        self.post(endpoints::ORDERS, order).await
    }

    /// Cancel a whole order. The server refuses once any line has left `PLACED`.
    pub async fn cancel_order(&self, order_id: i64) -> ApiResult<MessageResponse> {
        self.request(Method::DELETE, &endpoints::order(order_id), None)
            .await?
            .json()
    }

    pub async fn addresses(&self) -> ApiResult<Vec<Address>> {
        self.get(endpoints::ADDRESSES).await
    }

    pub async fn create_address(&self, address: &NewAddress) -> ApiResult<Address> {
        self.post(endpoints::ADDRESSES, address).await
    }
}
