//! Gallery page at `/home`

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::core::api::RESET_PASSWORD_SUCCESS_MESSAGE;
use crate::core::gallery::Gallery;
use crate::core::reorder::Reorder;
use crate::core::routes::AUTH_PATH;
use crate::ui::api_client;
use crate::ui::common::{Button, ButtonVariant, SuccessMessage};
use crate::ui::gallery::{ImageGrid, OrderStatus, ResetPasswordModal, UploadButton, persist_order};
use crate::ui::icon::{Icon, icons};
use crate::ui::session::use_session;

#[component]
pub fn GalleryPage() -> impl IntoView {
    let session = use_session();

    let gallery = RwSignal::new(Gallery::default());
    let loading = RwSignal::new(true);
    let show_reset = RwSignal::new(false);
    let notice = RwSignal::new(None::<String>);

    // Initial fetch, once per mount
    Effect::new(move |_| {
        spawn_local(async move {
            match api_client::fetch_images().await {
                Ok(images) => gallery.update(|g| g.replace(images)),
                Err(e) => {
                    leptos::logging::error!("Error fetching images: {}", e);
                    if e.is_unauthorized() {
                        session.sign_out();
                    }
                }
            }
            loading.set(false);
        });
    });

    let images = Signal::derive(move || gallery.with(|g| g.images().to_vec()));

    let on_reorder = Callback::new(move |reorder: Reorder| {
        if let Some(update) = gallery
            .try_update(|g| g.reorder(reorder.from, reorder.to))
            .flatten()
        {
            persist_order(gallery, update);
        }
    });

    let on_retry = Callback::new(move |_| {
        if let Some(update) = gallery.try_update(|g| g.retry()).flatten() {
            persist_order(gallery, update);
        }
    });

    let open_reset = Callback::new(move |_| {
        notice.set(None);
        show_reset.set(true);
    });

    let on_reset_success = Callback::new(move |_| {
        show_reset.set(false);
        notice.set(Some(RESET_PASSWORD_SUCCESS_MESSAGE.to_string()));
    });

    let logout = Callback::new(move |_| {
        session.sign_out();
        let navigate = use_navigate();
        navigate(AUTH_PATH, Default::default());
    });

    view! {
        <main class="gallery-page">
            <header class="gallery-header">
                <div>
                    <h1 class="title-xl">"Image Gallery"</h1>
                    {move || session.user().map(|user| {
                        let who = if user.name.is_empty() { user.email } else { user.name };
                        view! { <p class="gallery-user">"Signed in as " {who}</p> }
                    })}
                </div>
                <div class="gallery-actions">
                    <Button variant=ButtonVariant::Secondary icon=icons::KEY on_click=open_reset>
                        "Reset Password"
                    </Button>
                    <Button variant=ButtonVariant::Danger icon=icons::LOGOUT on_click=logout>
                        "Logout"
                    </Button>
                </div>
            </header>

            <SuccessMessage message=notice />

            <div class="gallery-toolbar">
                <UploadButton gallery=gallery />
                <OrderStatus
                    gallery=gallery
                    on_retry=on_retry
                    on_dismiss=Callback::new(move |_| gallery.update(|g| g.dismiss_failure()))
                />
            </div>

            <Show
                when=move || !images.with(|list| list.is_empty())
                fallback=move || view! {
                    <div class="gallery-empty">
                        <Icon name=icons::IMAGE class="w-10 h-10 opacity-50"/>
                        <p>
                            {move || if loading.get() { "Loading images..." } else { "No images yet. Upload some to get started." }}
                        </p>
                    </div>
                }
            >
                <ImageGrid images=images on_reorder=on_reorder />
            </Show>

            <ResetPasswordModal
                is_open=show_reset
                on_close=Callback::new(move |_| show_reset.set(false))
                on_success=on_reset_success
            />
        </main>
    }
}
