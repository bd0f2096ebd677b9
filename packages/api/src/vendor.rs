//! Vendor area: own products, product images, order fulfilment and the dashboard.

use serde_json::json;
use store::SessionStorage;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiResult;
use crate::models::{
    ImageFile, OrderStatus, ProductImage, ProductInput, StatusUpdate, StatusUpdated,
    VendorDashboard, VendorOrderLine, VendorProduct,
};
use crate::transport::{FormField, Method, RequestBody, Transport};

impl<T: Transport, S: SessionStorage> ApiClient<T, S> {
    pub async fn vendor_products(&self) -> ApiResult<Vec<VendorProduct>> {
        self.get(endpoints::VENDOR_PRODUCTS).await
    }

    pub async fn vendor_product(&self, id: i64) -> ApiResult<VendorProduct> {
        self.get(&endpoints::vendor_product(id)).await
    }

    pub async fn create_product(&self, product: &ProductInput) -> ApiResult<VendorProduct> {
        self.post(endpoints::VENDOR_PRODUCTS, product).await
    }

    pub async fn update_product(&self, id: i64, product: &ProductInput) -> ApiResult<VendorProduct> {
        self.put(&endpoints::vendor_product(id), product).await
    }

    pub async fn delete_product(&self, id: i64) -> ApiResult<()> {
        self.delete(&endpoints::vendor_product(id)).await
    }

    /// Order lines for the vendor's products, newest first.
    pub async fn vendor_orders(&self) -> ApiResult<Vec<VendorOrderLine>> {
        self.get(endpoints::VENDOR_ORDERS).await
    }

    pub async fn update_order_status(
        &self,
        line_id: i64,
        status: OrderStatus,
    ) -> ApiResult<StatusUpdated> {
        self.patch(&endpoints::vendor_order(line_id), &StatusUpdate { status })
            .await
    }

    pub async fn dashboard(&self) -> ApiResult<VendorDashboard> {
        self.get(endpoints::VENDOR_DASHBOARD).await
    }

    pub async fn product_images(&self, product_id: i64) -> ApiResult<Vec<ProductImage>> {
        self.get(&endpoints::product_images_for(product_id)).await
    }

    /// Upload an image as `multipart/form-data`. The first image of a product
    /// becomes its primary image.
    pub async fn upload_product_image(
        &self,
        product_id: i64,
        file: ImageFile,
    ) -> ApiResult<ProductImage> {
        let form = vec![
            FormField::Text {
                name: "product".to_string(),
                value: product_id.to_string(),
            },
            FormField::File {
                name: "image".to_string(),
                file_name: file.file_name,
                mime: file.mime,
                bytes: file.bytes,
            },
        ];
        self.request(
            Method::POST,
            endpoints::PRODUCT_IMAGES,
            Some(RequestBody::Multipart(form)),
        )
        .await?
        .json()
    }

    pub async fn set_primary_image(&self, image_id: i64) -> ApiResult<ProductImage> {
        self.patch(&endpoints::product_image(image_id), &json!({ "is_primary": true }))
            .await
    }

    pub async fn delete_product_image(&self, image_id: i64) -> ApiResult<()> {
        self.delete(&endpoints::product_image(image_id)).await
    }
}
