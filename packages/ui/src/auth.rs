//! Authentication context and hooks for the UI.

use api::ApiError;
use dioxus::prelude::*;
use store::{SessionState, LOGIN_PATH};

use crate::client::{make_client, MarketClient};

/// Current session state. Updates whenever the user logs in, logs out or a
/// refresh fails.
pub fn use_auth() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

/// The shared API client.
pub fn use_api() -> MarketClient {
    use_context::<MarketClient>()
}

/// Provider component that owns the client and mirrors its session into a signal.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let client = use_hook(make_client);
    let mut session = use_signal(SessionState::default);

    use_context_provider(|| client.clone());
    use_context_provider(|| session);

    // Hydrate once, then follow every identity change for the app's lifetime.
    let watched = client.clone();
    use_future(move || {
        let client = watched.clone();
        async move {
            let store = client.session();
            let mut changes = store.subscribe();
            session.set(store.hydrate().await);
            while changes.changed().await.is_ok() {
                let next = changes.borrow_and_update().clone();
                if *session.peek() != next {
                    session.set(next);
                }
            }
        }
    });

    use_drop(move || client.session().teardown());

    rsx! {
        {children}
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Logout".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let client = use_api();
    let nav = use_navigator();

    let onclick = move |_| {
        let client = client.clone();
        async move {
            client.logout().await;
            nav.replace(LOGIN_PATH);
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

/// Inline error message for a failed call.
///
/// Errors that need a fresh login send the user to the login page instead.
#[component]
pub fn ErrorNotice(error: ApiError) -> Element {
    let nav = use_navigator();

    if error.requires_login() {
        tracing::info!(error = %error, "login required, leaving page");
        nav.replace(LOGIN_PATH);
        return rsx! {};
    }

    rsx! {
        div {
            class: "px-2.5 py-2.5 bg-red-50 border border-red-200 rounded text-red-600 text-[0.8125rem]",
            "{error.message()}"
        }
    }
}
