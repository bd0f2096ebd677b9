use api::models::ProductDetail as Product;
use api::ApiError;
use dioxus::prelude::*;
use store::{login_redirect, Role, SessionState};
use ui::{use_api, use_auth, ErrorNotice};

use crate::Route;

#[component]
pub fn ProductDetail(slug: String) -> Element {
    let client = use_api();
    let auth = use_auth();
    let nav = use_navigator();
    let mut product = use_signal(|| Option::<Product>::None);
    let mut quantity = use_signal(|| 1u32);
    let mut error = use_signal(|| Option::<ApiError>::None);
    let mut notice = use_signal(|| Option::<String>::None);

    // Track the slug in a signal so the loader re-runs when the route param changes.
    let mut current_slug = use_signal(|| slug.clone());
    if *current_slug.peek() != slug {
        current_slug.set(slug.clone());
    }

    let loader_client = client.clone();
    let _loader = use_resource(move || {
        let client = loader_client.clone();
        let slug = current_slug();
        async move {
            match client.get_product(&slug).await {
                Ok(p) => {
                    product.set(Some(p));
                    error.set(None);
                }
                Err(e) => error.set(Some(e)),
            }
        }
    });

    let add_to_cart = move |_| {
        let client = client.clone();
        async move {
            let Some(product_id) = product.peek().as_ref().map(|p| p.id) else {
                return;
            };
            if !matches!(&*auth.peek(), SessionState::Active(_)) {
                let here = Route::ProductDetail { slug: current_slug() }.to_string();
                nav.push(login_redirect(&here).as_str());
                return;
            }
            match client.add_to_cart(product_id, quantity()).await {
                Ok(_) => notice.set(Some("Added to cart".to_string())),
                Err(e) => error.set(Some(e)),
            }
        }
    };

    let can_buy = !matches!(
        &*auth.read(),
        SessionState::Active(session) if session.user.role == Role::Vendor
    );

    rsx! {
        if let Some(err) = error() {
            ErrorNotice { error: err }
        }

        match product() {
            None => rsx! {
                p { class: "text-neutral-500", "Loading..." }
            },
            Some(p) => {
                let thumbnail = p.thumbnail().map(str::to_string);
                let shop = p.vendor.as_ref().map(|v| v.shop_name.clone()).unwrap_or_default();
                let category = p.category.as_ref().map(|c| c.name.clone()).unwrap_or_default();
                let description = p.description.clone().unwrap_or_default();
                rsx! {
                    div {
                        class: "grid md:grid-cols-2 gap-8",
                        div {
                            if let Some(src) = thumbnail {
                                img { class: "w-full rounded", src: "{src}", alt: "{p.name}" }
                            }
                            div {
                                class: "flex gap-2 mt-2",
                                for image in p.images.iter().filter_map(|i| i.image.clone()) {
                                    img { key: "{image}", class: "w-16 h-16 object-cover rounded", src: "{image}" }
                                }
                            }
                        }
                        div {
                            class: "flex flex-col gap-3",
                            h1 { class: "text-2xl font-bold", "{p.name}" }
                            span { class: "text-xl", "₹{p.price}" }
                            if !shop.is_empty() {
                                span { class: "text-neutral-600", "Sold by {shop}" }
                            }
                            if !category.is_empty() {
                                span { class: "text-neutral-600", "{category}" }
                            }
                            p { "{description}" }
                            if p.stock > 0 {
                                span { class: "text-green-700", "{p.stock} in stock" }
                            } else {
                                span { class: "text-red-600", "Out of stock" }
                            }

                            if can_buy && p.stock > 0 {
                                div {
                                    class: "flex gap-2 items-center",
                                    input {
                                        class: "w-20 border rounded px-2 py-1",
                                        r#type: "number",
                                        min: "1",
                                        max: "{p.stock}",
                                        value: "{quantity}",
                                        oninput: move |evt: FormEvent| {
                                            if let Ok(q) = evt.value().parse::<u32>() {
                                                quantity.set(q.max(1));
                                            }
                                        },
                                    }
                                    button {
                                        class: "rounded bg-neutral-800 text-white px-4 py-2",
                                        onclick: add_to_cart,
                                        "Add to cart"
                                    }
                                }
                            }
                            if let Some(msg) = notice() {
                                span { class: "text-green-700", "{msg}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
