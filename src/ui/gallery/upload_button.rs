use leptos::prelude::*;

use crate::core::gallery::Gallery;
use crate::ui::icon::{Icon, icons};

/// File picker for one or more images.
///
/// Disabled while an upload is running; the gallery's upload slot also
/// refuses a second upload if the change event still fires.
#[component]
pub fn UploadButton(gallery: RwSignal<Gallery>) -> impl IntoView {
    let uploading = Memo::new(move |_| gallery.with(|g| g.is_uploading()));

    view! {
        <label
            class="btn-base btn-primary upload-button"
            class:btn-disabled=move || uploading.get()
            aria-disabled=move || uploading.get().to_string()
        >
            {move || if uploading.get() {
                view! { <Icon name=icons::LOADER class="icon-btn animate-spin"/> }.into_any()
            } else {
                view! { <Icon name=icons::UPLOAD class="icon-btn"/> }.into_any()
            }}
            {move || if uploading.get() { "Uploading..." } else { "Upload Images" }}
            <input
                type="file"
                accept="image/*"
                multiple=true
                class="sr-only"
                disabled=move || uploading.get()
                on:change=move |ev| {
                    #[cfg(not(feature = "ssr"))]
                    {
                        use leptos::task::spawn_local;
                        use leptos::wasm_bindgen::JsCast;

                        use crate::ui::api_client;

                        let Some(input) = ev
                            .target()
                            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
                        else {
                            return;
                        };
                        let files: Vec<web_sys::File> = match input.files() {
                            Some(list) => (0..list.length()).filter_map(|i| list.get(i)).collect(),
                            None => Vec::new(),
                        };
                        // Lets the same files be picked again later
                        input.set_value("");

                        if files.is_empty() {
                            return;
                        }
                        if !gallery.try_update(|g| g.begin_upload()).unwrap_or(false) {
                            leptos::logging::warn!("Upload already in progress");
                            return;
                        }

                        spawn_local(async move {
                            match api_client::upload_images(&files).await {
                                Ok(images) => gallery.update(|g| g.finish_upload(Some(images))),
                                Err(e) => {
                                    leptos::logging::error!("Error uploading images: {}", e);
                                    gallery.update(|g| g.finish_upload(None));
                                }
                            }
                        });
                    }
                    #[cfg(feature = "ssr")]
                    {
                        let _ = ev;
                    }
                }
            />
        </label>
    }
}
