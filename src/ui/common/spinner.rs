use leptos::prelude::*;

/// Spinner size options
#[derive(Clone, Copy, PartialEq)]
pub enum SpinnerSize {
    Medium,
    Large,
}

impl SpinnerSize {
    fn class(&self) -> &'static str {
        match self {
            SpinnerSize::Medium => "spinner-md",
            SpinnerSize::Large => "spinner-lg",
        }
    }
}

/// Circular loading spinner
#[component]
pub fn Spinner(
    #[prop(default = SpinnerSize::Medium)]
    size: SpinnerSize,
    /// Optional label text
    #[prop(default = "")]
    label: &'static str,
) -> impl IntoView {
    view! {
        <div class="spinner-container">
            <div class=format!("spinner {}", size.class()) role="status" aria-live="polite">
                <span class="sr-only">"Loading..."</span>
            </div>
            {(!label.is_empty()).then(|| view! {
                <div class="spinner-label">{label}</div>
            })}
        </div>
    }
}

/// Centered page-level spinner
#[component]
pub fn LoadingSpinner(
    #[prop(default = "")]
    message: &'static str,
) -> impl IntoView {
    view! {
        <div class="spinner-centered">
            <Spinner size=SpinnerSize::Large label=message />
        </div>
    }
}
