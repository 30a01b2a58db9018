//! Route guards
//!
//! Each guard re-reads the persisted token when it mounts and then renders
//! its children, a redirect, or a spinner while the session is unknown.

use leptos::prelude::*;
use leptos_router::components::Redirect;

use super::common::LoadingSpinner;
use super::session::use_session;
use crate::core::routes::{Gate, GuardDecision};

fn guarded(gate: Gate, children: ChildrenFn) -> impl IntoView {
    let session = use_session();

    Effect::new(move |_| session.revalidate());

    let decision = Memo::new(move |_| session.decide(gate));

    move || match decision.get() {
        GuardDecision::Pending => view! {
            <div class="min-h-screen flex items-center justify-center">
                <LoadingSpinner />
            </div>
        }
        .into_any(),
        GuardDecision::Render => children().into_any(),
        GuardDecision::Redirect(path) => view! { <Redirect path=path /> }.into_any(),
    }
}

/// Renders only for visitors without a session; signed-in users go to the gallery
#[component]
pub fn PublicOnlyRoute(children: ChildrenFn) -> impl IntoView {
    guarded(Gate::PublicOnly, children)
}

/// Renders only for signed-in users; everyone else goes to the auth form
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    guarded(Gate::Protected, children)
}
