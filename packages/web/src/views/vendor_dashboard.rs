use api::models::{OrderLine, VendorDashboard as Dashboard};
use api::ApiError;
use dioxus::prelude::*;
use ui::{use_api, ErrorNotice};

#[component]
pub fn VendorDashboard() -> Element {
    let client = use_api();
    let mut dashboard = use_signal(|| Option::<Dashboard>::None);
    let mut error = use_signal(|| Option::<ApiError>::None);

    let _loader = use_resource(move || {
        let client = client.clone();
        async move {
            match client.dashboard().await {
                Ok(d) => dashboard.set(Some(d)),
                Err(e) => error.set(Some(e)),
            }
        }
    });

    rsx! {
        h1 { class: "text-2xl font-bold mb-4", "Dashboard" }

        if let Some(err) = error() {
            ErrorNotice { error: err }
        }

        if let Some(d) = dashboard() {
            div {
                class: "grid grid-cols-2 md:grid-cols-4 gap-4 mb-8",
                Stat { label: "Products", value: d.stats.total_products }
                Stat { label: "Orders", value: d.stats.total_orders }
                Stat { label: "Pending", value: d.stats.pending_orders }
                Stat { label: "Completed", value: d.stats.completed_orders }
            }

            h2 { class: "text-lg font-medium mb-2", "Recent products" }
            ul {
                class: "mb-6",
                for p in d.recent_products.clone() {
                    li { key: "{p.id}", "{p.name} · ₹{p.price}" }
                }
            }

            OrderList { title: "Pending orders", lines: d.pending_orders.clone() }
            OrderList { title: "Recent orders", lines: d.recent_orders.clone() }
            OrderList { title: "Completed orders", lines: d.completed_orders.clone() }
        } else {
            p { class: "text-neutral-500", "Loading..." }
        }
    }
}

#[component]
fn Stat(label: String, value: u64) -> Element {
    rsx! {
        div {
            class: "border rounded p-4",
            div { class: "text-sm text-neutral-500", "{label}" }
            div { class: "text-2xl font-bold", "{value}" }
        }
    }
}

#[component]
fn OrderList(title: String, lines: Vec<OrderLine>) -> Element {
    rsx! {
        h2 { class: "text-lg font-medium mb-2", "{title}" }
        if lines.is_empty() {
            p { class: "text-neutral-500 mb-6", "Nothing here." }
        } else {
            ul {
                class: "mb-6",
                for line in lines {
                    li {
                        key: "{line.id}",
                        "{line.product.name} × {line.quantity} · {line.status}"
                    }
                }
            }
        }
    }
}
