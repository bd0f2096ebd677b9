//! Account creation for customers and vendors.

use api::models::{CustomerRegistration, VendorRegistration};
use dioxus::prelude::*;
use store::LOGIN_PATH;
use ui::use_api;

#[component]
pub fn RegisterCustomer() -> Element {
    rsx! {
        RegistrationForm { vendor: false }
    }
}

#[component]
pub fn RegisterVendor() -> Element {
    rsx! {
        RegistrationForm { vendor: true }
    }
}

fn optional(value: String) -> Option<String> {
    let value = value.trim().to_string();
    (!value.is_empty()).then_some(value)
}

#[component]
fn RegistrationForm(vendor: bool) -> Element {
    let client = use_api();
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut shop_name = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        spawn(async move {
            error.set(None);

            let u = username().trim().to_string();
            let e = email().trim().to_string();
            let p = password();

            if u.is_empty() {
                error.set(Some("Username is required".to_string()));
                return;
            }
            if e.is_empty() || !e.contains('@') {
                error.set(Some("Please enter a valid email".to_string()));
                return;
            }
            if p.is_empty() {
                error.set(Some("Password is required".to_string()));
                return;
            }
            if vendor && shop_name().trim().is_empty() {
                error.set(Some("Shop name is required".to_string()));
                return;
            }

            loading.set(true);
            let result = if vendor {
                client
                    .register_vendor(&VendorRegistration {
                        username: u,
                        email: e,
                        password: p,
                        shop_name: shop_name().trim().to_string(),
                        description: optional(description()),
                    })
                    .await
            } else {
                client
                    .register_customer(&CustomerRegistration {
                        username: u,
                        email: e,
                        password: p,
                        phone: optional(phone()),
                    })
                    .await
            };

            match result {
                Ok(_) => {
                    nav.replace(LOGIN_PATH);
                }
                Err(e) => {
                    loading.set(false);
                    error.set(Some(e.message()));
                }
            }
        });
    };

    let title = if vendor { "Open a shop" } else { "Create Account" };

    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-[70vh] p-8",

            h1 {
                class: "mb-8 text-neutral-800 font-bold text-[1.75rem]",
                "{title}"
            }

            form {
                onsubmit: handle_register,
                class: "flex flex-col gap-3 w-full max-w-[320px]",

                if let Some(err) = error() {
                    div {
                        class: "px-2.5 py-2.5 bg-red-50 border border-red-200 rounded text-red-600 text-[0.8125rem]",
                        "{err}"
                    }
                }

                input {
                    class: "w-full border rounded px-3 py-2",
                    r#type: "text",
                    placeholder: "Username",
                    value: username(),
                    oninput: move |evt: FormEvent| username.set(evt.value()),
                }
                input {
                    class: "w-full border rounded px-3 py-2",
                    r#type: "email",
                    placeholder: "Email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
                input {
                    class: "w-full border rounded px-3 py-2",
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                if vendor {
                    input {
                        class: "w-full border rounded px-3 py-2",
                        r#type: "text",
                        placeholder: "Shop name",
                        value: shop_name(),
                        oninput: move |evt: FormEvent| shop_name.set(evt.value()),
                    }
                    textarea {
                        class: "w-full border rounded px-3 py-2",
                        placeholder: "Describe your shop (optional)",
                        value: description(),
                        oninput: move |evt: FormEvent| description.set(evt.value()),
                    }
                } else {
                    input {
                        class: "w-full border rounded px-3 py-2",
                        r#type: "tel",
                        placeholder: "Phone (optional)",
                        value: phone(),
                        oninput: move |evt: FormEvent| phone.set(evt.value()),
                    }
                }

                button {
                    class: "w-full rounded bg-neutral-800 text-white py-2 font-medium",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Creating account..." } else { "Sign up" }
                }
            }

            p {
                class: "mt-6 text-sm text-neutral-600",
                "Already have an account? "
                Link { to: "/login", "Sign in" }
            }
        }
    }
}
