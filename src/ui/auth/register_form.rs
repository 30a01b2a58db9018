//! Registration form component

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::fields::{AuthFields, AuthFormState};
use crate::core::api::{REGISTRATION_SUCCESS_MESSAGE, SignupRequest, UNEXPECTED_ERROR_MESSAGE};
use crate::core::validation::AuthMode;
use crate::ui::api_client;
use crate::ui::common::{Button, ErrorMessage, SuccessMessage};
use crate::ui::icon::{Icon, icons};

/// Sign-up form. A successful registration shows a notice and leaves the
/// visitor on the page; it does not sign them in.
#[component]
pub fn RegisterForm() -> impl IntoView {
    let form = AuthFormState::new(AuthMode::Register);
    let notice = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if form.submitting.get_untracked() {
            return;
        }
        form.server_error.set(None);
        notice.set(None);

        let Some(values) = form.validate() else {
            return;
        };

        form.submitting.set(true);
        spawn_local(async move {
            let result = api_client::signup(&SignupRequest::from(&values)).await;
            form.submitting.set(false);

            match result {
                Ok(()) => {
                    leptos::logging::log!("Registration succeeded for {}", values.email.trim());
                    notice.set(Some(REGISTRATION_SUCCESS_MESSAGE.to_string()));
                }
                Err(e) => {
                    leptos::logging::error!("Error during registration: {}", e);
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
            <h1 class="title-lg">"Register"</h1>
        </div>
        <form on:submit=on_submit novalidate=true class="auth-form">
            <ErrorMessage error=form.server_error />
            <SuccessMessage message=notice />
            <AuthFields state=form />
            <Button button_type="submit" loading=form.submitting class="w-full">
                "Sign Up"
            </Button>
        </form>
    }
}
