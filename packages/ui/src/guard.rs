use dioxus::prelude::*;
use store::{evaluate, GuardDecision, Role};

use crate::auth::use_auth;

/// Renders `children` only when the session satisfies `role`.
///
/// `destination` is the path being guarded; an anonymous visitor is sent to the
/// login page with it preserved in `?next=`. While the session is still being
/// restored nothing is decided and a placeholder is shown.
#[component]
pub fn Protected(
    #[props(!optional)] role: Option<Role>,
    destination: String,
    children: Element,
) -> Element {
    let session = use_auth();
    let nav = use_navigator();

    let decision = evaluate(&session.read(), role, &destination);
    match decision {
        GuardDecision::Wait => rsx! {
            div {
                class: "flex items-center justify-center min-h-[50vh] text-neutral-500",
                "Loading..."
            }
        },
        GuardDecision::RedirectToLogin { to } | GuardDecision::RedirectUnauthorized { to } => {
            tracing::debug!(from = %destination, %to, "guard redirect");
            nav.replace(to.as_str());
            rsx! {}
        }
        GuardDecision::Render => rsx! {
            {children}
        },
    }
}
