use crate::ui::icon::{Icon, icons};
use leptos::prelude::*;

/// Button variant types
#[derive(Clone, Copy, PartialEq)]
pub enum ButtonVariant {
    Primary,
    Secondary,
    Danger,
}

impl ButtonVariant {
    fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn-primary",
            ButtonVariant::Secondary => "btn-secondary",
            ButtonVariant::Danger => "btn-danger",
        }
    }
}

/// Button with a variant style, an optional leading icon and a loading state
#[component]
pub fn Button(
    #[prop(default = ButtonVariant::Primary)]
    variant: ButtonVariant,
    /// Click handler; not needed for submit buttons
    #[prop(optional)]
    on_click: Option<Callback<()>>,
    /// `button` or `submit`
    #[prop(default = "button")]
    button_type: &'static str,
    #[prop(optional, into)]
    disabled: Signal<bool>,
    /// Shows a spinner and blocks clicks
    #[prop(optional, into)]
    loading: Signal<bool>,
    #[prop(optional)]
    icon: Option<&'static str>,
    #[prop(default = "")]
    class: &'static str,
    children: Children,
) -> impl IntoView {
    let classes = format!("btn-base {} {}", variant.class(), class);

    view! {
        <button
            type=button_type
            class=classes
            on:click=move |_| {
                if !loading.get_untracked()
                    && let Some(callback) = on_click.as_ref()
                {
                    callback.run(());
                }
            }
            disabled=move || disabled.get() || loading.get()
        >
            {move || if loading.get() {
                view! { <Icon name=icons::LOADER class="icon-btn animate-spin"/> }.into_any()
            } else if let Some(icon_name) = icon {
                view! { <Icon name=icon_name class="icon-btn"/> }.into_any()
            } else {
                ().into_any()
            }}
            {children()}
        </button>
    }
}
