//! Password reset dialog
//!
//! Only checks that the new password and its confirmation agree; the server
//! decides everything else and its message is shown as is.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::api::{RESET_PASSWORD_FAILED_MESSAGE, ResetPasswordRequest};
use crate::core::validation::{PasswordResetValues, validate_password_reset};
use crate::ui::api_client;
use crate::ui::common::{BaseModal, Button, ButtonVariant, ErrorMessage, FormField};
use crate::ui::session::use_session;

#[component]
pub fn ResetPasswordModal(
    #[prop(into)]
    is_open: Signal<bool>,
    on_close: Callback<()>,
    /// Called after the server accepted the new password
    on_success: Callback<()>,
) -> impl IntoView {
    let session = use_session();

    let current_password = RwSignal::new(String::new());
    let new_password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);

    // Every opening starts without a stale message
    Effect::new(move |_| {
        if is_open.get() {
            error.set(None);
        }
    });

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        error.set(None);

        let values = PasswordResetValues {
            current_password: current_password.get_untracked(),
            new_password: new_password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        if let Err(e) = validate_password_reset(&values) {
            error.set(Some(e.to_string()));
            return;
        }

        let Some(user_id) = session.user_id_untracked() else {
            leptos::logging::error!("Password reset without a signed-in user");
            error.set(Some(RESET_PASSWORD_FAILED_MESSAGE.to_string()));
            return;
        };

        loading.set(true);
        spawn_local(async move {
            let result =
                api_client::reset_password(&user_id, &ResetPasswordRequest::from(&values)).await;
            loading.set(false);

            match result {
                Ok(()) => {
                    current_password.set(String::new());
                    new_password.set(String::new());
                    confirm_password.set(String::new());
                    on_success.run(());
                }
                Err(e) => {
                    leptos::logging::error!("Error resetting password: {}", e);
                    error.set(Some(e.user_message(RESET_PASSWORD_FAILED_MESSAGE)));
                }
            }
        });
    };

    view! {
        <BaseModal title="Reset Password" is_open=is_open on_close=on_close>
            <form on:submit=on_submit novalidate=true class="space-y-4">
                <ErrorMessage error=error />
                <FormField
                    label="Current Password"
                    name="currentPassword"
                    input_type="password"
                    autocomplete="current-password"
                    value=current_password
                    on_input=Callback::new(move |value| current_password.set(value))
                />
                <FormField
                    label="New Password"
                    name="newPassword"
                    input_type="password"
                    autocomplete="new-password"
                    value=new_password
                    on_input=Callback::new(move |value: String| {
                        new_password.set(value.trim().to_string())
                    })
                />
                <FormField
                    label="Confirm Password"
                    name="confirmPassword"
                    input_type="password"
                    autocomplete="new-password"
                    value=confirm_password
                    on_input=Callback::new(move |value: String| {
                        confirm_password.set(value.trim().to_string())
                    })
                />
                <div class="modal-actions">
                    <Button variant=ButtonVariant::Secondary on_click=on_close>
                        "Cancel"
                    </Button>
                    <Button button_type="submit" loading=loading>
                        "Reset Password"
                    </Button>
                </div>
            </form>
        </BaseModal>
    }
}
