use api::models::{ImageFile, ProductImage};
use api::ApiError;
use dioxus::prelude::*;
use ui::{use_api, ErrorNotice};

use crate::Route;

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name.rsplit('.').next().unwrap_or_default().to_ascii_lowercase();
    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "image/jpeg",
    }
}

/// Upload, reorder and delete the images of one product.
#[component]
pub fn ProductImages(id: i64) -> Element {
    let client = use_api();
    let mut images = use_signal(Vec::<ProductImage>::new);
    let mut selected = use_signal(|| Option::<ImageFile>::None);
    let mut error = use_signal(|| Option::<ApiError>::None);
    let mut uploading = use_signal(|| false);

    let loader_client = client.clone();
    let mut loader = use_resource(move || {
        let client = loader_client.clone();
        async move {
            match client.product_images(id).await {
                Ok(list) => images.set(list),
                Err(e) => error.set(Some(e)),
            }
        }
    });

    let pick_file = move |evt: FormEvent| async move {
        let Some(engine) = evt.files() else {
            return;
        };
        let Some(file_name) = engine.files().into_iter().next() else {
            return;
        };
        match engine.read_file(&file_name).await {
            Some(bytes) => selected.set(Some(ImageFile {
                mime: mime_for(&file_name).to_string(),
                file_name,
                bytes,
            })),
            None => tracing::warn!(file = %file_name, "could not read selected file"),
        }
    };

    let upload_client = client.clone();
    let upload = move |_| {
        let client = upload_client.clone();
        async move {
            let Some(file) = selected() else {
                return;
            };
            uploading.set(true);
            match client.upload_product_image(id, file).await {
                Ok(_) => {
                    selected.set(None);
                    loader.restart();
                }
                Err(e) => error.set(Some(e)),
            }
            uploading.set(false);
        }
    };

    let primary_client = client.clone();
    let make_primary = use_callback(move |image_id: i64| {
        let client = primary_client.clone();
        spawn(async move {
            match client.set_primary_image(image_id).await {
                Ok(_) => loader.restart(),
                Err(e) => error.set(Some(e)),
            }
        });
    });

    let remove = use_callback(move |image_id: i64| {
        let client = client.clone();
        spawn(async move {
            match client.delete_product_image(image_id).await {
                Ok(()) => loader.restart(),
                Err(e) => error.set(Some(e)),
            }
        });
    });

    rsx! {
        div {
            class: "flex items-center mb-4",
            h1 { class: "text-2xl font-bold mr-auto", "Product images" }
            Link { to: Route::VendorProducts {}, "Back to products" }
        }

        if let Some(err) = error() {
            ErrorNotice { error: err }
        }

        div {
            class: "flex gap-2 items-center mb-6",
            input {
                r#type: "file",
                accept: "image/*",
                onchange: pick_file,
            }
            button {
                class: "rounded bg-neutral-800 text-white px-4 py-2",
                disabled: uploading() || selected().is_none(),
                onclick: upload,
                if uploading() { "Uploading..." } else { "Upload" }
            }
        }

        div {
            class: "grid grid-cols-2 md:grid-cols-4 gap-4",
            for image in images() {
                div {
                    key: "{image.id}",
                    class: "border rounded p-2 flex flex-col gap-2",
                    if let Some(src) = image.image.clone() {
                        img { class: "w-full h-32 object-cover", src: "{src}" }
                    }
                    if image.is_primary {
                        span { class: "text-sm text-green-700", "Primary" }
                    } else {
                        button {
                            class: "text-sm",
                            onclick: move |_| make_primary.call(image.id),
                            "Make primary"
                        }
                    }
                    button {
                        class: "text-sm text-red-600",
                        onclick: move |_| remove.call(image.id),
                        "Delete"
                    }
                }
            }
        }
    }
}
