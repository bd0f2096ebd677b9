use api::models::VendorProduct;
use api::ApiError;
use dioxus::prelude::*;
use ui::{use_api, ErrorNotice};

use crate::Route;

/// The vendor's own catalog with edit, images and delete actions.
#[component]
pub fn VendorProducts() -> Element {
    let client = use_api();
    let mut products = use_signal(|| Option::<Vec<VendorProduct>>::None);
    let mut error = use_signal(|| Option::<ApiError>::None);

    let loader_client = client.clone();
    let mut loader = use_resource(move || {
        let client = loader_client.clone();
        async move {
            match client.vendor_products().await {
                Ok(list) => products.set(Some(list)),
                Err(e) => error.set(Some(e)),
            }
        }
    });

    let delete = use_callback(move |id: i64| {
        let client = client.clone();
        spawn(async move {
            match client.delete_product(id).await {
                Ok(()) => loader.restart(),
                Err(e) => error.set(Some(e)),
            }
        });
    });

    rsx! {
        div {
            class: "flex items-center mb-4",
            h1 { class: "text-2xl font-bold mr-auto", "Your products" }
            Link {
                class: "rounded bg-neutral-800 text-white px-4 py-2",
                to: Route::AddProduct {},
                "Add product"
            }
        }

        if let Some(err) = error() {
            ErrorNotice { error: err }
        }

        match products() {
            None => rsx! {
                p { class: "text-neutral-500", "Loading..." }
            },
            Some(list) if list.is_empty() => rsx! {
                p { class: "text-neutral-500", "No products yet." }
            },
            Some(list) => rsx! {
                table {
                    class: "w-full text-left",
                    thead {
                        tr {
                            th { "Name" }
                            th { "Price" }
                            th { "Stock" }
                            th { "Status" }
                            th {}
                        }
                    }
                    tbody {
                        for p in list {
                            tr {
                                key: "{p.id}",
                                td { "{p.name}" }
                                td { "₹{p.price}" }
                                td { "{p.stock}" }
                                td { "{p.status.clone().unwrap_or_default()}" }
                                td {
                                    class: "flex gap-3",
                                    Link { to: Route::EditProduct { id: p.id }, "Edit" }
                                    Link { to: Route::ProductImages { id: p.id }, "Images" }
                                    button {
                                        class: "text-red-600",
                                        onclick: move |_| delete.call(p.id),
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }
                }
            },
        }
    }
}
