use dioxus::prelude::*;
use store::Role;

use ui::{AuthProvider, Navbar, Protected};
use views::{
    AddProduct, Addresses, Cart, EditProduct, Home, Login, NotFound, Orders, ProductDetail,
    ProductImages, RegisterCustomer, RegisterVendor, Unauthorized, VendorDashboard,
    VendorOrders, VendorProducts,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/product/:slug")]
        ProductDetail { slug: String },
        #[route("/login?:next")]
        Login { next: String },
        #[route("/register/customer")]
        RegisterCustomer {},
        #[route("/register/vendor")]
        RegisterVendor {},
        #[route("/unauthorized")]
        Unauthorized {},

        #[layout(CustomerArea)]
            #[route("/cart")]
            Cart {},
            #[route("/orders")]
            Orders {},
            #[route("/address")]
            Addresses {},
        #[end_layout]

        #[layout(VendorArea)]
            #[route("/vendor/dashboard")]
            VendorDashboard {},
            #[route("/vendor/products")]
            VendorProducts {},
            #[route("/vendor/products/add")]
            AddProduct {},
            #[route("/vendor/products/:id/edit")]
            EditProduct { id: i64 },
            #[route("/vendor/products/:id/images")]
            ProductImages { id: i64 },
            #[route("/vendor/orders")]
            VendorOrders {},
        #[end_layout]
    #[end_layout]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

fn main() {
    dioxus::logger::init(tracing::Level::INFO).expect("logger failed to init");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        AuthProvider {
            Router::<Route> {}
        }
    }
}

/// Navbar above every page.
#[component]
fn Shell() -> Element {
    rsx! {
        Navbar {}
        main {
            class: "max-w-5xl mx-auto p-6",
            Outlet::<Route> {}
        }
    }
}

#[component]
fn CustomerArea() -> Element {
    let route = use_route::<Route>();
    rsx! {
        Protected {
            role: Some(Role::Customer),
            destination: route.to_string(),
            Outlet::<Route> {}
        }
    }
}

#[component]
fn VendorArea() -> Element {
    let route = use_route::<Route>();
    rsx! {
        Protected {
            role: Some(Role::Vendor),
            destination: route.to_string(),
            Outlet::<Route> {}
        }
    }
}
