//! Login page. `next` carries the page the guard interrupted.

use api::models::Credentials;
use api::ApiError;
use dioxus::prelude::*;
use store::{safe_next, SessionState};
use ui::{use_api, use_auth};

#[component]
pub fn Login(next: String) -> Element {
    let client = use_api();
    let auth = use_auth();
    let nav = use_navigator();
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // Already logged in: go where the visitor was headed.
    if let SessionState::Active(session) = &*auth.read() {
        nav.replace(safe_next(&next, session.user.role).as_str());
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        let next = next.clone();
        spawn(async move {
            error.set(None);
            let u = username().trim().to_string();
            let p = password();
            if u.is_empty() || p.is_empty() {
                error.set(Some("Username and password are required".to_string()));
                return;
            }

            loading.set(true);
            match client.login(&Credentials::new(u, p)).await {
                Ok(user) => {
                    nav.replace(safe_next(&next, user.role).as_str());
                }
                Err(e) => {
                    loading.set(false);
                    let message = match e {
                        ApiError::Unauthenticated => "Invalid username or password".to_string(),
                        other => other.message(),
                    };
                    error.set(Some(message));
                }
            }
        });
    };

    rsx! {
        div {
            class: "flex flex-col items-center justify-center min-h-[70vh] p-8",

            h1 {
                class: "mb-2 text-neutral-800 font-bold text-[1.75rem]",
                "Sign in"
            }

            form {
                onsubmit: handle_login,
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
                    r#type: "password",
                    placeholder: "Password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }

                button {
                    class: "w-full rounded bg-neutral-800 text-white py-2 font-medium",
                    r#type: "submit",
                    disabled: loading(),
                    if loading() { "Signing in..." } else { "Sign in" }
                }
            }

            p {
                class: "mt-6 text-sm text-neutral-600",
                "New here? "
                Link { to: "/register/customer", "Create a customer account" }
                " or "
                Link { to: "/register/vendor", "open a shop" }
            }
        }
    }
}
