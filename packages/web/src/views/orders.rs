use api::models::OrderLine;
use api::ApiError;
use dioxus::prelude::*;
use ui::{use_api, ErrorNotice};

/// The customer's order lines, newest first, with cancellation of untouched orders.
#[component]
pub fn Orders() -> Element {
    let client = use_api();
    let mut lines = use_signal(|| Option::<Vec<OrderLine>>::None);
    let mut error = use_signal(|| Option::<ApiError>::None);
    let mut notice = use_signal(|| Option::<String>::None);

    let loader_client = client.clone();
    let mut loader = use_resource(move || {
        let client = loader_client.clone();
        async move {
            match client.orders().await {
                Ok(list) => lines.set(Some(list)),
                Err(e) => error.set(Some(e)),
            }
        }
    });

    let cancel = use_callback(move |order_id: i64| {
        let client = client.clone();
        spawn(async move {
            match client.cancel_order(order_id).await {
                Ok(ack) => {
                    let message = if ack.message.trim().is_empty() {
                        "Order cancelled".to_string()
                    } else {
                        ack.message.trim().to_string()
                    };
                    notice.set(Some(message));
                    loader.restart();
                }
                Err(e) => error.set(Some(e)),
            }
        });
    });

    rsx! {
        h1 { class: "text-2xl font-bold mb-4", "Your orders" }

        if let Some(err) = error() {
            ErrorNotice { error: err }
        }
        if let Some(msg) = notice() {
            p { class: "text-green-700", "{msg}" }
        }

        match lines() {
            None => rsx! {
                p { class: "text-neutral-500", "Loading..." }
            },
            Some(list) if list.is_empty() => rsx! {
                p { class: "text-neutral-500", "No orders yet." }
            },
            Some(list) => rsx! {
                table {
                    class: "w-full text-left",
                    thead {
                        tr {
                            th { "Order" }
                            th { "Product" }
                            th { "Qty" }
                            th { "Price" }
                            th { "Status" }
                            th {}
                        }
                    }
                    tbody {
                        for line in list {
                            tr {
                                key: "{line.id}",
                                td { "#{line.order_id.unwrap_or_default()}" }
                                td { "{line.product.name}" }
                                td { "{line.quantity}" }
                                td { "₹{line.price}" }
                                td { "{line.status}" }
                                td {
                                    if let (true, Some(order_id)) = (line.status.is_cancellable(), line.order_id) {
                                        button {
                                            class: "text-red-600",
                                            onclick: move |_| cancel.call(order_id),
                                            "Cancel"
                                        }
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
