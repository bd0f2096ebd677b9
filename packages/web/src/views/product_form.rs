//! Create and edit pages for vendor products.

use api::models::{Category, ProductInput};
use api::ApiError;
use dioxus::prelude::*;
use ui::{use_api, ErrorNotice};

use crate::Route;

#[component]
pub fn AddProduct() -> Element {
    rsx! {
        ProductForm { id: None }
    }
}

#[component]
pub fn EditProduct(id: i64) -> Element {
    rsx! {
        ProductForm { id: Some(id) }
    }
}

#[component]
fn ProductForm(#[props(!optional)] id: Option<i64>) -> Element {
    let client = use_api();
    let nav = use_navigator();
    let mut name = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut price = use_signal(String::new);
    let mut stock = use_signal(String::new);
    let mut category = use_signal(|| Option::<i64>::None);
    let mut categories = use_signal(Vec::<Category>::new);
    let mut error = use_signal(|| Option::<ApiError>::None);
    let mut invalid = use_signal(|| Option::<&'static str>::None);
    let mut saving = use_signal(|| false);

    let loader_client = client.clone();
    let _loader = use_resource(move || {
        let client = loader_client.clone();
        async move {
            match client.list_categories().await {
                Ok(list) => categories.set(list),
                Err(e) => tracing::warn!(error = %e, "could not load categories"),
            }
            let Some(id) = id else {
                return;
            };
            match client.vendor_product(id).await {
                Ok(p) => {
                    name.set(p.name);
                    description.set(p.description.unwrap_or_default());
                    price.set(p.price.to_string());
                    stock.set(p.stock.to_string());
                    category.set(p.category);
                }
                Err(e) => error.set(Some(e)),
            }
        }
    });

    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            invalid.set(None);
            let Ok(price_value) = price().trim().parse::<f64>() else {
                invalid.set(Some("Price must be a number"));
                return;
            };
            let Ok(stock_value) = stock().trim().parse::<i64>() else {
                invalid.set(Some("Stock must be a whole number"));
                return;
            };
            if name().trim().is_empty() {
                invalid.set(Some("Name is required"));
                return;
            }
            let input = ProductInput {
                name: name().trim().to_string(),
                description: description(),
                price: price_value,
                stock: stock_value,
                category: category(),
            };

            saving.set(true);
            let result = match id {
                Some(id) => client.update_product(id, &input).await,
                None => client.create_product(&input).await,
            };
            match result {
                Ok(saved) => {
                    tracing::info!(product = saved.id, "product saved");
                    if id.is_none() {
                        // New products go straight to image upload.
                        nav.replace(Route::ProductImages { id: saved.id });
                    } else {
                        nav.push(Route::VendorProducts {});
                    }
                }
                Err(e) => {
                    saving.set(false);
                    error.set(Some(e));
                }
            }
        });
    };

    let title = if id.is_some() { "Edit product" } else { "Add product" };

    rsx! {
        h1 { class: "text-2xl font-bold mb-4", "{title}" }

        if let Some(err) = error() {
            ErrorNotice { error: err }
        }
        if let Some(msg) = invalid() {
            p { class: "text-red-600", "{msg}" }
        }

        form {
            onsubmit: handle_save,
            class: "flex flex-col gap-3 max-w-[480px]",
            input {
                class: "border rounded px-3 py-2",
                placeholder: "Name",
                value: name(),
                oninput: move |evt: FormEvent| name.set(evt.value()),
            }
            textarea {
                class: "border rounded px-3 py-2",
                placeholder: "Description",
                value: description(),
                oninput: move |evt: FormEvent| description.set(evt.value()),
            }
            input {
                class: "border rounded px-3 py-2",
                r#type: "number",
                step: "0.01",
                placeholder: "Price",
                value: price(),
                oninput: move |evt: FormEvent| price.set(evt.value()),
            }
            input {
                class: "border rounded px-3 py-2",
                r#type: "number",
                placeholder: "Stock",
                value: stock(),
                oninput: move |evt: FormEvent| stock.set(evt.value()),
            }
            select {
                class: "border rounded px-3 py-2",
                onchange: move |evt: FormEvent| category.set(evt.value().parse().ok()),
                option { value: "", selected: category().is_none(), "No category" }
                for c in categories() {
                    option {
                        key: "{c.id}",
                        value: "{c.id}",
                        selected: category() == Some(c.id),
                        "{c.name}"
                    }
                }
            }
            button {
                class: "rounded bg-neutral-800 text-white py-2",
                r#type: "submit",
                disabled: saving(),
                if saving() { "Saving..." } else { "Save" }
            }
        }
    }
}
