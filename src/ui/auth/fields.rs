//! Shared state and inputs of the login and register forms

use leptos::prelude::*;

use crate::core::validation::{
    AuthFormValues, AuthMode, Field, FormErrors, validate_auth_form, validate_field,
};
use crate::ui::common::FormField;

/// Reactive values, per-field errors and submission state of one auth form
#[derive(Clone, Copy)]
pub struct AuthFormState {
    mode: AuthMode,
    email: RwSignal<String>,
    password: RwSignal<String>,
    confirm_password: RwSignal<String>,
    phone: RwSignal<String>,
    errors: RwSignal<FormErrors>,
    /// Message from the server (or the generic fallback)
    pub server_error: RwSignal<Option<String>>,
    pub submitting: RwSignal<bool>,
}

impl AuthFormState {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            email: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            confirm_password: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            errors: RwSignal::new(FormErrors::default()),
            server_error: RwSignal::new(None),
            submitting: RwSignal::new(false),
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    fn value(&self, field: Field) -> RwSignal<String> {
        match field {
            Field::Email => self.email,
            Field::Password => self.password,
            Field::ConfirmPassword => self.confirm_password,
            Field::Phone => self.phone,
        }
    }

    pub fn values_untracked(&self) -> AuthFormValues {
        AuthFormValues {
            email: self.email.get_untracked(),
            password: self.password.get_untracked(),
            confirm_password: self.confirm_password.get_untracked(),
            phone: self.phone.get_untracked(),
        }
    }

    /// User typed into `field`; its error goes away until the next check
    pub fn edit(&self, field: Field, value: String) {
        self.value(field).set(value);
        self.errors.update(|e| e.clear(field));
    }

    /// `field` lost focus
    pub fn touch(&self, field: Field) {
        let error = validate_field(field, &self.values_untracked(), self.mode);
        self.errors.update(|e| e.set(field, error));
    }

    /// Check every field. Returns the values when the form may be submitted.
    pub fn validate(&self) -> Option<AuthFormValues> {
        let values = self.values_untracked();
        match validate_auth_form(&values, self.mode) {
            Ok(()) => {
                self.errors.set(FormErrors::default());
                Some(values)
            }
            Err(errors) => {
                self.errors.set(errors);
                None
            }
        }
    }

    pub fn error(&self, field: Field) -> Signal<Option<String>> {
        let errors = self.errors;
        Signal::derive(move || errors.with(|e| e.get(field).map(|err| err.to_string())))
    }
}

struct FieldMeta {
    label: &'static str,
    input_type: &'static str,
    name: &'static str,
    autocomplete: &'static str,
    placeholder: &'static str,
}

fn field_meta(field: Field, mode: AuthMode) -> FieldMeta {
    match field {
        Field::Email => FieldMeta {
            label: "Email Address",
            input_type: "email",
            name: "email",
            autocomplete: "email",
            placeholder: "you@example.com",
        },
        Field::Phone => FieldMeta {
            label: "Phone Number",
            input_type: "tel",
            name: "phone",
            autocomplete: "tel",
            placeholder: "10 digits",
        },
        Field::Password => FieldMeta {
            label: "Password",
            input_type: "password",
            name: "password",
            autocomplete: if mode == AuthMode::Register {
                "new-password"
            } else {
                "current-password"
            },
            placeholder: "",
        },
        Field::ConfirmPassword => FieldMeta {
            label: "Confirm Password",
            input_type: "password",
            name: "confirmPassword",
            autocomplete: "new-password",
            placeholder: "",
        },
    }
}

/// Inputs for every field of the form's mode, in display order
#[component]
pub fn AuthFields(state: AuthFormState) -> impl IntoView {
    let mode = state.mode();

    mode.fields()
        .iter()
        .map(|&field| {
            let meta = field_meta(field, mode);
            view! {
                <FormField
                    label=meta.label
                    name=meta.name
                    input_type=meta.input_type
                    autocomplete=meta.autocomplete
                    placeholder=meta.placeholder
                    value=state.value(field)
                    on_input=Callback::new(move |value: String| state.edit(field, value))
                    on_blur=Callback::new(move |_| state.touch(field))
                    disabled=state.submitting
                    error=state.error(field)
                />
            }
        })
        .collect_view()
}
