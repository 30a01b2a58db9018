//! Login form component

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use super::fields::{AuthFields, AuthFormState};
use crate::core::api::{LoginRequest, UNEXPECTED_ERROR_MESSAGE};
use crate::core::routes::GALLERY_PATH;
use crate::core::validation::AuthMode;
use crate::ui::api_client;
use crate::ui::common::{Button, ErrorMessage};
use crate::ui::icon::{Icon, icons};
use crate::ui::session::use_session;

#[component]
pub fn LoginForm() -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();
    let form = AuthFormState::new(AuthMode::Login);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if form.submitting.get_untracked() {
            return;
        }
        form.server_error.set(None);

        let Some(values) = form.validate() else {
            return;
        };

        form.submitting.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = api_client::login(&LoginRequest::from(&values)).await;
            form.submitting.set(false);

            match result {
                Ok(payload) => match session.sign_in(payload) {
                    Ok(()) => navigate(GALLERY_PATH, Default::default()),
                    Err(e) => {
                        leptos::logging::error!("Error storing session: {}", e);
                        form.server_error.set(Some(UNEXPECTED_ERROR_MESSAGE.to_string()));
                    }
                },
                Err(e) => {
                    leptos::logging::error!("Error during authentication: {}", e);
                    form.server_error
                        .set(Some(e.user_message(UNEXPECTED_ERROR_MESSAGE)));
                }
            }
        });
    };

    view! {
        <div class="auth-form-header">
            <span class="auth-avatar">
                <Icon name=icons::LOCK class="w-5 h-5"/>
            </span>
            <h1 class="title-lg">"Login"</h1>
        </div>
        <form on:submit=on_submit novalidate=true class="auth-form">
            <ErrorMessage error=form.server_error />
            <AuthFields state=form />
            <Button button_type="submit" loading=form.submitting class="w-full">
                "Sign In"
            </Button>
        </form>
    }
}
