mod home;
pub use home::Home;

mod product_detail;
pub use product_detail::ProductDetail;

mod login;
pub use login::Login;

mod register;
pub use register::{RegisterCustomer, RegisterVendor};

mod unauthorized;
pub use unauthorized::{NotFound, Unauthorized};

mod cart;
pub use cart::Cart;

mod orders;
pub use orders::Orders;

mod addresses;
pub use addresses::Addresses;

mod vendor_dashboard;
pub use vendor_dashboard::VendorDashboard;

mod vendor_products;
pub use vendor_products::VendorProducts;

mod product_form;
pub use product_form::{AddProduct, EditProduct};

mod product_images;
pub use product_images::ProductImages;

mod vendor_orders;
pub use vendor_orders::VendorOrders;
