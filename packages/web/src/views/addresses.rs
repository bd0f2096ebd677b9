use api::models::{Address, NewAddress};
use api::ApiError;
use dioxus::prelude::*;
use ui::{use_api, ErrorNotice};

/// Saved delivery addresses and a form to add one.
#[component]
pub fn Addresses() -> Element {
    let client = use_api();
    let mut addresses = use_signal(Vec::<Address>::new);
    let mut draft = use_signal(NewAddress::default);
    let mut error = use_signal(|| Option::<ApiError>::None);
    let mut saving = use_signal(|| false);
    let mut incomplete = use_signal(|| false);

    let loader_client = client.clone();
    let mut loader = use_resource(move || {
        let client = loader_client.clone();
        async move {
            match client.addresses().await {
                Ok(list) => addresses.set(list),
                Err(e) => error.set(Some(e)),
            }
        }
    });

    let handle_save = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            let address = draft();
            incomplete.set(!address.is_complete());
            if incomplete() {
                return;
            }
            saving.set(true);
            match client.create_address(&address).await {
                Ok(_) => {
                    draft.set(NewAddress::default());
                    error.set(None);
                    loader.restart();
                }
                Err(e) => error.set(Some(e)),
            }
            saving.set(false);
        });
    };

    rsx! {
        h1 { class: "text-2xl font-bold mb-4", "Delivery addresses" }

        if let Some(err) = error() {
            ErrorNotice { error: err }
        }
        if incomplete() {
            p { class: "text-red-600", "All address fields are required" }
        }

        ul {
            class: "flex flex-col gap-2 mb-8",
            for a in addresses() {
                li {
                    key: "{a.id}",
                    class: "border rounded p-3",
                    "{a.line}, {a.city}, {a.state} {a.pincode}"
                    if a.is_default {
                        span { class: "ml-2 text-sm text-neutral-500", "(default)" }
                    }
                }
            }
        }

        form {
            onsubmit: handle_save,
            class: "flex flex-col gap-3 max-w-[420px]",
            input {
                class: "border rounded px-3 py-2",
                placeholder: "Address line",
                value: draft().line,
                oninput: move |evt: FormEvent| draft.write().line = evt.value(),
            }
            input {
                class: "border rounded px-3 py-2",
                placeholder: "City",
                value: draft().city,
                oninput: move |evt: FormEvent| draft.write().city = evt.value(),
            }
            input {
                class: "border rounded px-3 py-2",
                placeholder: "State",
                value: draft().state,
                oninput: move |evt: FormEvent| draft.write().state = evt.value(),
            }
            input {
                class: "border rounded px-3 py-2",
                placeholder: "Pincode",
                value: draft().pincode,
                oninput: move |evt: FormEvent| draft.write().pincode = evt.value(),
            }
            label {
                class: "flex gap-2 items-center",
                input {
                    r#type: "checkbox",
                    checked: draft().is_default,
                    onchange: move |evt: FormEvent| draft.write().is_default = evt.checked(),
                }
                "Use as default"
            }
            button {
                class: "rounded bg-neutral-800 text-white py-2",
                r#type: "submit",
                disabled: saving(),
                if saving() { "Saving..." } else { "Add address" }
            }
        }
    }
}
