//! Login and registration forms

mod fields;
mod login_form;
mod register_form;

pub use fields::{AuthFields, AuthFormState};
pub use login_form::LoginForm;
pub use register_form::RegisterForm;
