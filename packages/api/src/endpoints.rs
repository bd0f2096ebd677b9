//! # Endpoint table
//!
//! Relative paths (joined onto [`crate::ClientConfig::api_root`]) for every call the
//! client makes, plus the public allow-list.
//!
//! | Path | Methods | Auth |
//! |------|---------|------|
//! | `login/` | POST | public |
//! | `register/customer/`, `register/vendor/` | POST | public |
//! | `token/refresh/` | POST | public |
//! | `products/`, `products/{id_or_slug}/`, `categories/` | GET | public |
//! | `customer/cart/`, `customer/cart/{id}/` | GET, POST, DELETE | private |
//! | `customer/orders/`, `customer/orders/{id}/` | GET, POST, DELETE | private |
//! | `customer/addresses/` | GET, POST | private |
//! | `vendor/products/`, `vendor/products/{id}/` | GET, POST, PUT, DELETE | private |
//! | `vendor/orders/`, `vendor/orders/{id}/` | GET, PATCH | private |
//! | `dashboard/` | GET | private |
//! | `product-images/`, `product-images/{id}/` | GET, POST, PATCH, DELETE | private |

pub const LOGIN: &str = "login/";
pub const REGISTER_CUSTOMER: &str = "register/customer/";
pub const REGISTER_VENDOR: &str = "register/vendor/";
pub const TOKEN_REFRESH: &str = "token/refresh/";
pub const PRODUCTS: &str = "products/";
pub const CATEGORIES: &str = "categories/";
pub const CART: &str = "customer/cart/";
pub const ORDERS: &str = "customer/orders/";
pub const ADDRESSES: &str = "customer/addresses/";
pub const VENDOR_PRODUCTS: &str = "vendor/products/";
pub const VENDOR_ORDERS: &str = "vendor/orders/";
pub const VENDOR_DASHBOARD: &str = "dashboard/";
pub const PRODUCT_IMAGES: &str = "product-images/";

/// Path prefixes that never carry a bearer token.
///
/// `token/` covers both token issuance and `token/refresh/`.
pub const PUBLIC_PATHS: [&str; 6] = [
    "login/",
    "register/customer/",
    "register/vendor/",
    "token/",
    "products/",
    "categories/",
];

/// Whether `path` is reachable without credentials.
pub fn is_public(path: &str) -> bool {
    let path = path.trim_start_matches('/');
    PUBLIC_PATHS.iter().any(|prefix| path.starts_with(prefix))
}

pub fn product(id_or_slug: &str) -> String {
    format!("{PRODUCTS}{}/", urlencoding::encode(id_or_slug))
}

pub fn cart_item(id: i64) -> String {
    format!("{CART}{id}/")
}

pub fn order(id: i64) -> String {
    format!("{ORDERS}{id}/")
}

pub fn vendor_product(id: i64) -> String {
    format!("{VENDOR_PRODUCTS}{id}/")
}

pub fn vendor_order(id: i64) -> String {
    format!("{VENDOR_ORDERS}{id}/")
}

pub fn product_image(id: i64) -> String {
    format!("{PRODUCT_IMAGES}{id}/")
}

pub fn product_images_for(product_id: i64) -> String {
    format!("{PRODUCT_IMAGES}?product={product_id}")
}

/// Append `key=value` pairs as a query string, skipping empty values.
pub fn with_query(path: &str, params: &[(&str, String)]) -> String {
    let query: Vec<String> = params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect();
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{}", query.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_paths() {
        assert!(is_public(LOGIN));
        assert!(is_public("/register/vendor/"));
        assert!(is_public(TOKEN_REFRESH));
        assert!(is_public("products/?page=2"));
        assert!(is_public(&product("red-kettle")));
        assert!(is_public(CATEGORIES));
    }

    #[test]
    fn test_private_paths() {
        assert!(!is_public(CART));
        assert!(!is_public(&order(4)));
        assert!(!is_public(ADDRESSES));
        // Prefix match is anchored at the start of the path.
        assert!(!is_public(VENDOR_PRODUCTS));
        assert!(!is_public(&vendor_product(9)));
        assert!(!is_public(VENDOR_ORDERS));
        assert!(!is_public(VENDOR_DASHBOARD));
        assert!(!is_public(&product_images_for(3)));
    }

    #[test]
    fn test_with_query_skips_empty_values() {
        let path = with_query(
            PRODUCTS,
            &[
                ("page", "2".to_string()),
                ("search", "tea pot".to_string()),
                ("category", String::new()),
            ],
        );
        assert_eq!(path, "products/?page=2&search=tea%20pot");
        assert_eq!(with_query(CATEGORIES, &[]), "categories/");
    }
}
