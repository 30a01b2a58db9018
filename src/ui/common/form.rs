use crate::ui::icon::{Icon, icons};
use leptos::prelude::*;

/// Labelled input with an inline error line
#[component]
pub fn FormField(
    /// Field label text
    label: &'static str,
    /// `name`/`id` of the input
    name: &'static str,
    /// Input type (text, password, email, tel)
    #[prop(default = "text")]
    input_type: &'static str,
    #[prop(default = "off")]
    autocomplete: &'static str,
    #[prop(default = "")]
    placeholder: &'static str,
    /// Current value signal
    #[prop(into)]
    value: Signal<String>,
    /// Input event callback
    on_input: Callback<String>,
    /// Called when the input loses focus
    #[prop(optional)]
    on_blur: Option<Callback<()>>,
    #[prop(optional, into)]
    disabled: Signal<bool>,
    /// Optional error message to display
    #[prop(optional, into)]
    error: Option<Signal<Option<String>>>,
) -> impl IntoView {
    let has_error = move || error.as_ref().and_then(|e| e.get()).is_some();

    view! {
        <div class="space-y-1.5">
            <label for=name class="label">{label}</label>
            <input
                type=input_type
                id=name
                name=name
                autocomplete=autocomplete
                class="input-base"
                class:border-red-500=has_error
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
                on:blur=move |_| {
                    if let Some(callback) = on_blur.as_ref() {
                        callback.run(());
                    }
                }
                disabled=move || disabled.get()
            />
            {move || {
                error.as_ref().and_then(|e| e.get()).map(|err| view! {
                    <div class="field-error">
                        <Icon name=icons::ALERT_CIRCLE class="icon-text"/>
                        <span>{err}</span>
                    </div>
                })
            }}
        </div>
    }
}
