//! Public catalog reads. None of these carry credentials.

use store::SessionStorage;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiResult;
use crate::models::{Category, Page, ProductDetail, ProductQuery, ProductSummary};
use crate::transport::Transport;

impl<T: Transport, S: SessionStorage> ApiClient<T, S> {
    /// One page of active products matching `query`.
    pub async fn list_products(&self, query: &ProductQuery) -> ApiResult<Page<ProductSummary>> {
        self.get(&query.to_path()).await
    }

    /// A single product by numeric id or slug.
    pub async fn get_product(&self, id_or_slug: &str) -> ApiResult<ProductDetail> {
        self.get(&endpoints::product(id_or_slug)).await
    }

    pub async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        self.get(endpoints::CATEGORIES).await
    }
}
