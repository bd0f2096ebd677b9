//! Catalog payloads: products, categories, images, pagination.

use serde::{Deserialize, Serialize};

use super::Amount;
use crate::endpoints;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: i64,
    pub product: i64,
    /// Absolute URL of the uploaded file.
    pub image: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// Product as shown in listings and dashboard cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    pub price: Amount,
    /// Primary image URL (listing serializer).
    #[serde(default)]
    pub image: Option<String>,
    /// Full image set (detail-style serializers).
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl ProductSummary {
    /// Best image to display: the listed one, else the primary, else the first.
    pub fn thumbnail(&self) -> Option<&str> {
        self.image
            .as_deref()
            .or_else(|| primary_image(&self.images))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorInfo {
    pub id: i64,
    pub shop_name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Amount,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub vendor: Option<VendorInfo>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl ProductDetail {
    pub fn thumbnail(&self) -> Option<&str> {
        primary_image(&self.images)
    }
}

/// A vendor's own product, as returned by `vendor/products/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorProduct {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Amount,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub category: Option<i64>,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

/// Body for creating or replacing a vendor product.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub category: Option<i64>,
}

/// An image file picked for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// DRF page-number pagination envelope.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }
}

/// Filters for `GET products/`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// 1-based page number; 0 is treated as 1.
    pub page: u32,
    pub search: String,
    pub category: Option<i64>,
    pub min_price: String,
    pub max_price: String,
    /// `price`, `-price`, `created_at` or `-created_at`.
    pub ordering: String,
}

impl ProductQuery {
    pub fn page(page: u32) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Endpoint path including the query string.
    pub fn to_path(&self) -> String {
        endpoints::with_query(
            endpoints::PRODUCTS,
            &[
                ("page", self.page.max(1).to_string()),
                ("search", self.search.trim().to_string()),
                (
                    "category",
                    self.category.map(|c| c.to_string()).unwrap_or_default(),
                ),
                ("price__gte", self.min_price.trim().to_string()),
                ("price__lte", self.max_price.trim().to_string()),
                ("ordering", self.ordering.clone()),
            ],
        )
    }
}

fn primary_image(images: &[ProductImage]) -> Option<&str> {
    images
        .iter()
        .find(|img| img.is_primary)
        .or_else(|| images.first())
        .and_then(|img| img.image.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_query_path() {
        let query = ProductQuery {
            page: 2,
            search: " kettle ".into(),
            category: Some(3),
            max_price: "500".into(),
            ordering: "-price".into(),
            ..ProductQuery::default()
        };
        assert_eq!(
            query.to_path(),
            "products/?page=2&search=kettle&category=3&price__lte=500&ordering=-price"
        );
        assert_eq!(ProductQuery::default().to_path(), "products/?page=1");
    }

    #[test]
    fn test_page_decodes() {
        let page: Page<ProductSummary> = serde_json::from_str(
            r#"{"count":11,"next":"http://x/api/products/?page=2","previous":null,
                "results":[{"id":1,"name":"Kettle","slug":"kettle","price":"249.00","image":null}]}"#,
        )
        .unwrap();
        assert!(page.has_more());
        assert_eq!(page.results[0].price.as_str(), "249.00");
        assert!(page.results[0].thumbnail().is_none());
    }

    #[test]
    fn test_thumbnail_prefers_primary() {
        let summary = ProductSummary {
            id: 1,
            name: "Mug".into(),
            slug: "mug".into(),
            price: Amount("10".into()),
            image: None,
            images: vec![
                ProductImage {
                    id: 1,
                    product: 1,
                    image: Some("a.jpg".into()),
                    is_primary: false,
                },
                ProductImage {
                    id: 2,
                    product: 1,
                    image: Some("b.jpg".into()),
                    is_primary: true,
                },
            ],
        };
        assert_eq!(summary.thumbnail(), Some("b.jpg"));
    }
}
