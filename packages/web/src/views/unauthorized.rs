use dioxus::prelude::*;

use crate::Route;

/// Where the guard sends a logged-in user who lacks the page's role.
#[component]
pub fn Unauthorized() -> Element {
    rsx! {
        div {
            class: "flex flex-col items-center gap-4 py-16",
            h1 { class: "text-2xl font-bold", "Not allowed" }
            p { class: "text-neutral-600", "Your account does not have access to this page." }
            Link { to: Route::Home {}, "Back to the shop" }
        }
    }
}

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "flex flex-col items-center gap-4 py-16",
            h1 { class: "text-2xl font-bold", "Page not found" }
            p { class: "text-neutral-600", "Nothing lives at /{path}." }
            Link { to: Route::Home {}, "Back to the shop" }
        }
    }
}
