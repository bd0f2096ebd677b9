//! Cart contents and checkout to a saved address.

use api::models::{self, Address, PlaceOrder};
use api::ApiError;
use dioxus::prelude::*;
use ui::{use_api, ErrorNotice};

use crate::Route;

#[component]
pub fn Cart() -> Element {
    let client = use_api();
    let nav = use_navigator();
    let mut cart = use_signal(|| Option::<models::Cart>::None);
    let mut addresses = use_signal(Vec::<Address>::new);
    let mut address_id = use_signal(|| Option::<i64>::None);
    let mut error = use_signal(|| Option::<ApiError>::None);
    let mut placing = use_signal(|| false);

    let loader_client = client.clone();
    let mut loader = use_resource(move || {
        let client = loader_client.clone();
        async move {
            match client.cart().await {
                Ok(c) => cart.set(Some(c)),
                Err(e) => error.set(Some(e)),
            }
            match client.addresses().await {
                Ok(list) => {
                    let preferred = list
                        .iter()
                        .find(|a| a.is_default)
                        .or_else(|| list.first())
                        .map(|a| a.id);
                    address_id.set(preferred);
                    addresses.set(list);
                }
                Err(e) => error.set(Some(e)),
            }
        }
    });

    let remove_client = client.clone();
    let remove_item = use_callback(move |item_id: i64| {
        let client = remove_client.clone();
        spawn(async move {
            match client.remove_cart_item(item_id).await {
                Ok(()) => loader.restart(),
                Err(e) => error.set(Some(e)),
            }
        });
    });

    let checkout = move |_| {
        let client = client.clone();
        async move {
            let Some(address) = address_id() else {
                return;
            };
            placing.set(true);
            match client.place_order(&PlaceOrder::from_cart(address)).await {
                Ok(order) => {
                    tracing::info!(order = order.id, "order placed");
                    nav.push(Route::Orders {});
                }
                Err(e) => {
                    placing.set(false);
                    error.set(Some(e));
                }
            }
        }
    };

    rsx! {
        h1 { class: "text-2xl font-bold mb-4", "Your cart" }

        if let Some(err) = error() {
            ErrorNotice { error: err }
        }

        match cart() {
            None => rsx! {
                p { class: "text-neutral-500", "Loading..." }
            },
            Some(c) if c.items.is_empty() => rsx! {
                p { class: "text-neutral-500", "Your cart is empty." }
                Link { to: Route::Home {}, "Continue shopping" }
            },
            Some(c) => rsx! {
                ul {
                    class: "flex flex-col gap-3",
                    for item in c.items.clone() {
                        li {
                            key: "{item.id}",
                            class: "flex items-center gap-4 border rounded p-3",
                            if let Some(src) = item.product.thumbnail() {
                                img { class: "w-16 h-16 object-cover", src: "{src}" }
                            }
                            span { class: "flex-1", "{item.product.name}" }
                            span { "× {item.quantity}" }
                            span { "₹{item.product.price}" }
                            button {
                                class: "text-red-600",
                                onclick: move |_| remove_item.call(item.id),
                                "Remove"
                            }
                        }
                    }
                }
                p { class: "text-lg font-medium mt-4", "Total: ₹{c.total_price}" }

                if addresses().is_empty() {
                    p {
                        class: "mt-4",
                        "Add a delivery address before checking out: "
                        Link { to: Route::Addresses {}, "manage addresses" }
                    }
                } else {
                    div {
                        class: "flex gap-2 items-center mt-4",
                        select {
                            class: "border rounded px-3 py-2",
                            onchange: move |evt: FormEvent| address_id.set(evt.value().parse().ok()),
                            for a in addresses() {
                                option {
                                    key: "{a.id}",
                                    value: "{a.id}",
                                    selected: address_id() == Some(a.id),
                                    "{a.line}, {a.city} {a.pincode}"
                                }
                            }
                        }
                        button {
                            class: "rounded bg-neutral-800 text-white px-4 py-2",
                            disabled: placing() || address_id().is_none(),
                            onclick: checkout,
                            if placing() { "Placing order..." } else { "Place order" }
                        }
                    }
                }
            },
        }
    }
}
