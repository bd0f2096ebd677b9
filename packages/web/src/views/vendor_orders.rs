use api::models::{OrderStatus, VendorOrderLine};
use api::ApiError;
use dioxus::prelude::*;
use ui::{use_api, ErrorNotice};

/// Order lines to fulfil. Each line moves one step along the fulfilment workflow
/// at a time, or is cancelled before it ships.
#[component]
pub fn VendorOrders() -> Element {
    let client = use_api();
    let mut lines = use_signal(|| Option::<Vec<VendorOrderLine>>::None);
    let mut error = use_signal(|| Option::<ApiError>::None);

    let loader_client = client.clone();
    let mut loader = use_resource(move || {
        let client = loader_client.clone();
        async move {
            match client.vendor_orders().await {
                Ok(list) => lines.set(Some(list)),
                Err(e) => error.set(Some(e)),
            }
        }
    });

    let set_status = use_callback(move |(line_id, status): (i64, OrderStatus)| {
        let client = client.clone();
        spawn(async move {
            match client.update_order_status(line_id, status).await {
                Ok(updated) => {
                    tracing::info!(line = line_id, status = %updated.new_status, "order line updated");
                    loader.restart();
                }
                Err(e) => error.set(Some(e)),
            }
        });
    });

    rsx! {
        h1 { class: "text-2xl font-bold mb-4", "Orders" }

        if let Some(err) = error() {
            ErrorNotice { error: err }
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
                            th { "Customer" }
                            th { "Qty" }
                            th { "Total" }
                            th { "Status" }
                            th {}
                        }
                    }
                    tbody {
                        for line in list {
                            tr {
                                key: "{line.id}",
                                td { "#{line.order_id}" }
                                td { "{line.product}" }
                                td { "{line.customer}" }
                                td { "{line.quantity}" }
                                td { "₹{line.total_amount}" }
                                td { "{line.status}" }
                                td {
                                    class: "flex gap-3",
                                    if let Some(next) = line.status.next_fulfilment_step() {
                                        button {
                                            onclick: move |_| set_status.call((line.id, next)),
                                            "Mark {next}"
                                        }
                                    }
                                    if line.status.vendor_can_cancel() {
                                        button {
                                            class: "text-red-600",
                                            onclick: move |_| set_status.call((line.id, OrderStatus::Cancelled)),
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
