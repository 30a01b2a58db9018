//! Auth page at `/`
//!
//! Two panels: sign-in on the left, registration on the right. Both start as
//! prompts; the visitor picks one once and that panel turns into its form.

use leptos::prelude::*;

use crate::core::validation::AuthMode;
use crate::ui::auth::{LoginForm, RegisterForm};
use crate::ui::common::{Button, ButtonVariant};

#[component]
pub fn AuthPage() -> impl IntoView {
    let mode = RwSignal::new(AuthMode::default());
    let choose = move |next: AuthMode| {
        mode.update(|m| {
            m.choose(next);
        });
    };
    let is_unset = move || mode.get() == AuthMode::Unset;

    view! {
        <main class="auth-page">
            <div class="auth-backdrop"></div>
            <div class="auth-panels card">
                <section class="auth-panel auth-panel-left">
                    <Show
                        when=move || mode.get() == AuthMode::Login
                        fallback=move || view! {
                            <AuthPrompt
                                text="Welcome! Sign in to see what's new and continue your journey."
                                action="Login"
                                show_action=Signal::derive(is_unset)
                                on_action=Callback::new(move |_| choose(AuthMode::Login))
                            />
                        }
                    >
                        <LoginForm />
                    </Show>
                </section>

                <section class="auth-panel">
                    <Show
                        when=move || mode.get() == AuthMode::Register
                        fallback=move || view! {
                            <AuthPrompt
                                text="Join us! Register to unlock new features and start your journey with us."
                                action="Register"
                                show_action=Signal::derive(is_unset)
                                on_action=Callback::new(move |_| choose(AuthMode::Register))
                            />
                        }
                    >
                        <RegisterForm />
                    </Show>
                </section>
            </div>
        </main>
    }
}

/// Greeting with the button that picks a mode
#[component]
fn AuthPrompt(
    text: &'static str,
    action: &'static str,
    /// The button disappears once a mode has been picked
    show_action: Signal<bool>,
    on_action: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="auth-prompt">
            <p class="auth-prompt-text">{text}</p>
            <Show when=move || show_action.get()>
                <Button variant=ButtonVariant::Primary on_click=on_action>
                    {action}
                </Button>
            </Show>
        </div>
    }
}
