//! Product catalog with search, category filter and "load more" paging.

use api::models::{Category, ProductQuery, ProductSummary};
use api::ApiError;
use dioxus::prelude::*;
use ui::{use_api, ErrorNotice};

use crate::Route;

#[component]
pub fn Home() -> Element {
    let client = use_api();
    let mut query = use_signal(|| ProductQuery::page(1));
    let mut search = use_signal(String::new);
    let mut products = use_signal(Vec::<ProductSummary>::new);
    let mut categories = use_signal(Vec::<Category>::new);
    let mut has_more = use_signal(|| false);
    let mut loading = use_signal(|| false);
    let mut error = use_signal(|| Option::<ApiError>::None);

    let categories_client = client.clone();
    let _categories = use_resource(move || {
        let client = categories_client.clone();
        async move {
            match client.list_categories().await {
                Ok(list) => categories.set(list),
                Err(e) => tracing::warn!(error = %e, "could not load categories"),
            }
        }
    });

    // Re-runs whenever the query changes; page 1 replaces, later pages append.
    let _loader = use_resource(move || {
        let client = client.clone();
        let q = query();
        async move {
            loading.set(true);
            match client.list_products(&q).await {
                Ok(page) => {
                    has_more.set(page.has_more());
                    if q.page <= 1 {
                        products.set(page.results);
                    } else {
                        products.write().extend(page.results);
                    }
                    error.set(None);
                }
                Err(e) => error.set(Some(e)),
            }
            loading.set(false);
        }
    });

    let handle_search = move |evt: FormEvent| {
        evt.prevent_default();
        let category = query.peek().category;
        query.set(ProductQuery {
            search: search(),
            category,
            ..ProductQuery::page(1)
        });
    };

    let handle_category = move |evt: FormEvent| {
        let category = evt.value().parse::<i64>().ok();
        let search = query.peek().search.clone();
        query.set(ProductQuery {
            search,
            category,
            ..ProductQuery::page(1)
        });
    };

    let load_more = move |_| {
        let next = query.peek().page.max(1) + 1;
        query.write().page = next;
    };

    rsx! {
        div {
            class: "flex flex-col gap-6",

            form {
                onsubmit: handle_search,
                class: "flex gap-2",
                input {
                    class: "flex-1 border rounded px-3 py-2",
                    r#type: "search",
                    placeholder: "Search products, shops, categories",
                    value: search(),
                    oninput: move |evt: FormEvent| search.set(evt.value()),
                }
                select {
                    class: "border rounded px-3 py-2",
                    onchange: handle_category,
                    option { value: "", "All categories" }
                    for category in categories() {
                        option { key: "{category.id}", value: "{category.id}", "{category.name}" }
                    }
                }
                button { class: "rounded bg-neutral-800 text-white px-4", r#type: "submit", "Search" }
            }

            if let Some(err) = error() {
                ErrorNotice { error: err }
            }

            if products().is_empty() && !loading() {
                p { class: "text-neutral-500", "No products found." }
            }

            div {
                class: "grid grid-cols-2 md:grid-cols-4 gap-4",
                for product in products() {
                    ProductCard { key: "{product.id}", product }
                }
            }

            if has_more() {
                button {
                    class: "self-center rounded border px-4 py-2",
                    disabled: loading(),
                    onclick: load_more,
                    if loading() { "Loading..." } else { "Load more" }
                }
            }
        }
    }
}

#[component]
fn ProductCard(product: ProductSummary) -> Element {
    let thumbnail = product.thumbnail().map(str::to_string);
    // The catalog endpoint resolves numeric ids; slugs are not always populated.
    let slug = product.id.to_string();
    rsx! {
        Link {
            class: "flex flex-col gap-2 border rounded p-3",
            to: Route::ProductDetail { slug },
            if let Some(src) = thumbnail {
                img { class: "w-full h-40 object-cover", src: "{src}", alt: "{product.name}" }
            }
            span { class: "font-medium", "{product.name}" }
            span { class: "text-neutral-600", "₹{product.price}" }
        }
    }
}
