//! Page shown for unknown paths

use leptos::prelude::*;
use leptos_router::components::A;

use crate::core::routes::AUTH_PATH;
use crate::ui::icon::{Icon, icons};

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <main class="not-found-page">
            <Icon name=icons::IMAGE class="w-12 h-12 opacity-50" />
            <h1 class="text-6xl font-bold mb-4">"404"</h1>
            <p class="mb-8">"The page you're looking for doesn't exist."</p>
            <A href=AUTH_PATH attr:class="btn-base btn-primary">
                "Go Home"
            </A>
        </main>
    }
}
