use leptos::prelude::*;

/// SVG icon served from `public/icons`
#[component]
pub fn Icon(
    /// Icon file name without the `.svg` extension
    name: &'static str,
    #[prop(default = "w-5 h-5")]
    class: &'static str,
) -> impl IntoView {
    let icon_path = format!("/icons/{}.svg", name);

    view! {
        <img
            src=icon_path
            class=class
            alt=""
            aria-hidden="true"
            draggable="false"
        />
    }
}

/// Icons shipped in `public/icons`
pub mod icons {
    pub const ALERT_CIRCLE: &str = "alert-circle";
    pub const CHECK: &str = "check";
    pub const IMAGE: &str = "image";
    pub const KEY: &str = "key";
    pub const LOADER: &str = "loader";
    pub const LOCK: &str = "lock";
    pub const LOGOUT: &str = "logout";
    pub const REFRESH: &str = "refresh";
    pub const UPLOAD: &str = "upload";
    pub const X: &str = "x";
}
