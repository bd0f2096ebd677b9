use dioxus::prelude::*;
use store::{Role, SessionState};

use crate::auth::{use_auth, LogoutButton};

/// Top bar. Links depend on who is logged in.
#[component]
pub fn Navbar() -> Element {
    let session = use_auth();

    let links = match &*session.read() {
        SessionState::Hydrating => rsx! {},
        SessionState::Anonymous => rsx! {
            Link { class: "nav-link", to: "/login", "Login" }
            Link { class: "nav-link", to: "/register/customer", "Sign up" }
            Link { class: "nav-link", to: "/register/vendor", "Sell with us" }
        },
        SessionState::Active(active) => {
            let username = active.user.username.clone();
            match active.user.role {
                Role::Customer => rsx! {
                    Link { class: "nav-link", to: "/cart", "Cart" }
                    Link { class: "nav-link", to: "/orders", "Orders" }
                    Link { class: "nav-link", to: "/address", "Addresses" }
                    span { class: "nav-user", "{username}" }
                    LogoutButton { class: "nav-link" }
                },
                Role::Vendor => rsx! {
                    Link { class: "nav-link", to: "/vendor/dashboard", "Dashboard" }
                    Link { class: "nav-link", to: "/vendor/products", "Products" }
                    Link { class: "nav-link", to: "/vendor/orders", "Orders" }
                    span { class: "nav-user", "{username}" }
                    LogoutButton { class: "nav-link" }
                },
            }
        }
    };

    rsx! {
        nav {
            class: "navbar flex items-center gap-4 px-6 py-3 border-b border-neutral-200",
            Link { class: "font-bold mr-auto", to: "/", "Marketplace" }
            {links}
        }
    }
}
