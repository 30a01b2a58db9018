use leptos::prelude::*;

use crate::core::gallery::{Gallery, SyncStatus};
use crate::ui::common::{Button, ButtonVariant};
use crate::ui::icon::{Icon, icons};

/// Saving indicator and the failure banner with retry
#[component]
pub fn OrderStatus(
    gallery: RwSignal<Gallery>,
    on_retry: Callback<()>,
    on_dismiss: Callback<()>,
) -> impl IntoView {
    let status = Memo::new(move |_| gallery.with(|g| g.status().clone()));

    move || match status.get() {
        SyncStatus::Synced => ().into_any(),
        SyncStatus::Pending => view! {
            <p class="order-saving" role="status">
                <Icon name=icons::LOADER class="icon-text animate-spin"/>
                "Saving order..."
            </p>
        }
        .into_any(),
        SyncStatus::Failed { message, .. } => view! {
            <div class="error-message order-failed" role="alert">
                <Icon name=icons::ALERT_CIRCLE class="icon-text"/>
                <span class="flex-1">{message}</span>
                <Button variant=ButtonVariant::Secondary icon=icons::REFRESH on_click=on_retry>
                    "Retry"
                </Button>
                <button
                    type="button"
                    class="btn-icon"
                    title="Dismiss"
                    aria-label="Dismiss"
                    on:click=move |_| on_dismiss.run(())
                >
                    <Icon name=icons::X class="icon-standalone"/>
                </button>
            </div>
        }
        .into_any(),
    }
}
