//! Client-side validation for the auth form and the password reset dialog
//!
//! Rules run before any network call. Messages are shown inline under the
//! offending field.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Minimum password length for login and registration
pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern is valid")
});

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is valid"));

/// Which form the visitor picked
///
/// Starts unset and is chosen once; there is no way back to `Unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Unset,
    Login,
    Register,
}

impl AuthMode {
    /// Pick a mode. Only the first choice is taken.
    pub fn choose(&mut self, mode: AuthMode) -> bool {
        if *self != AuthMode::Unset || mode == AuthMode::Unset {
            return false;
        }
        *self = mode;
        true
    }

    /// Fields submitted in this mode, in display order
    pub fn fields(self) -> &'static [Field] {
        match self {
            AuthMode::Register => &[
                Field::Email,
                Field::Phone,
                Field::Password,
                Field::ConfirmPassword,
            ],
            AuthMode::Login | AuthMode::Unset => &[Field::Email, Field::Password],
        }
    }
}

/// Auth form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Email,
    Password,
    ConfirmPassword,
    Phone,
}

/// Values typed into the auth form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthFormValues {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
}

/// A single field validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Email is required")]
    EmailRequired,
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least {} characters", MIN_PASSWORD_LENGTH)]
    PasswordTooShort,
    #[error("Confirm password is required")]
    ConfirmPasswordRequired,
    #[error("Passwords must match")]
    PasswordsMustMatch,
    #[error("Phone number is required")]
    PhoneRequired,
    #[error("Invalid phone number")]
    InvalidPhone,
}

/// All failures of one form, keyed by field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    /// Record the outcome of validating one field
    pub fn set(&mut self, field: Field, error: Option<FieldError>) {
        match error {
            Some(error) => {
                self.errors.insert(field, error);
            }
            None => {
                self.errors.remove(&field);
            }
        }
    }

    pub fn clear(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.errors.iter().map(|(field, error)| (*field, *error))
    }
}

pub fn validate_email(value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::EmailRequired);
    }
    if !EMAIL_PATTERN.is_match(value) {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_password(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::PasswordRequired);
    }
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(FieldError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_confirm_password(password: &str, confirm: &str) -> Result<(), FieldError> {
    if confirm.is_empty() {
        return Err(FieldError::ConfirmPasswordRequired);
    }
    if password != confirm {
        return Err(FieldError::PasswordsMustMatch);
    }
    Ok(())
}

pub fn validate_phone(value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::PhoneRequired);
    }
    if !PHONE_PATTERN.is_match(value) {
        return Err(FieldError::InvalidPhone);
    }
    Ok(())
}

/// Validate one field. Fields that do not belong to `mode` always pass.
pub fn validate_field(field: Field, values: &AuthFormValues, mode: AuthMode) -> Option<FieldError> {
    if !mode.fields().contains(&field) {
        return None;
    }

    let result = match field {
        Field::Email => validate_email(&values.email),
        Field::Password => validate_password(&values.password),
        Field::ConfirmPassword => {
            validate_confirm_password(&values.password, &values.confirm_password)
        }
        Field::Phone => validate_phone(&values.phone),
    };
    result.err()
}

/// Validate every field of `mode`
pub fn validate_auth_form(values: &AuthFormValues, mode: AuthMode) -> Result<(), FormErrors> {
    let errors: BTreeMap<Field, FieldError> = mode
        .fields()
        .iter()
        .filter_map(|field| validate_field(*field, values, mode).map(|e| (*field, e)))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(FormErrors { errors })
    }
}

/// Values typed into the password reset dialog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordResetValues {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordResetError {
    #[error("New password and confirm password do not match")]
    Mismatch,
}

/// The dialog only checks that both new passwords agree.
/// Everything else, including the current password, is up to the server.
pub fn validate_password_reset(values: &PasswordResetValues) -> Result<(), PasswordResetError> {
    if values.new_password != values.confirm_password {
        return Err(PasswordResetError::Mismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_values() -> AuthFormValues {
        AuthFormValues {
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            phone: "5551234567".to_string(),
        }
    }

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("first.last+tag@mail.example.org").is_ok());
        assert!(validate_email("  padded@example.com  ").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert_eq!(validate_email(""), Err(FieldError::EmailRequired));
        assert_eq!(validate_email("   "), Err(FieldError::EmailRequired));
        assert_eq!(validate_email("ada"), Err(FieldError::InvalidEmail));
        assert_eq!(validate_email("ada@"), Err(FieldError::InvalidEmail));
        assert_eq!(validate_email("ada@example"), Err(FieldError::InvalidEmail));
        assert_eq!(validate_email("a da@example.com"), Err(FieldError::InvalidEmail));
        assert_eq!(validate_email("@example.com"), Err(FieldError::InvalidEmail));
    }

    #[test]
    fn test_password_rules() {
        assert_eq!(validate_password(""), Err(FieldError::PasswordRequired));
        assert_eq!(validate_password("12345"), Err(FieldError::PasswordTooShort));
        assert!(validate_password("123456").is_ok());
        assert_eq!(
            FieldError::PasswordTooShort.to_string(),
            "Password must be at least 6 characters"
        );
    }

    #[test]
    fn test_phone_rules() {
        assert!(validate_phone("0123456789").is_ok());
        assert_eq!(validate_phone(""), Err(FieldError::PhoneRequired));
        assert_eq!(validate_phone("123456789"), Err(FieldError::InvalidPhone));
        assert_eq!(validate_phone("12345678901"), Err(FieldError::InvalidPhone));
        assert_eq!(validate_phone("555-123-456"), Err(FieldError::InvalidPhone));
        assert_eq!(validate_phone("+155512345"), Err(FieldError::InvalidPhone));
        assert_eq!(validate_phone("５５５１２３４５６７"), Err(FieldError::InvalidPhone));
    }

    #[test]
    fn test_register_mismatched_passwords_blocked() {
        let values = AuthFormValues {
            confirm_password: "secret2".to_string(),
            ..register_values()
        };

        let errors = validate_auth_form(&values, AuthMode::Register).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(Field::ConfirmPassword),
            Some(FieldError::PasswordsMustMatch)
        );
        assert_eq!(
            errors.get(Field::ConfirmPassword).unwrap().to_string(),
            "Passwords must match"
        );
    }

    #[test]
    fn test_register_bad_phone_blocked() {
        for phone in ["", "12345", "abcdefghij", "12345678901"] {
            let values = AuthFormValues {
                phone: phone.to_string(),
                ..register_values()
            };
            let errors = validate_auth_form(&values, AuthMode::Register).unwrap_err();
            assert!(errors.get(Field::Phone).is_some(), "phone {phone:?} passed");
        }
    }

    #[test]
    fn test_register_valid_form() {
        assert!(validate_auth_form(&register_values(), AuthMode::Register).is_ok());
    }

    #[test]
    fn test_login_ignores_register_fields() {
        let values = AuthFormValues {
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "different".to_string(),
            phone: "nope".to_string(),
        };

        assert!(validate_auth_form(&values, AuthMode::Login).is_ok());
        assert_eq!(validate_field(Field::Phone, &values, AuthMode::Login), None);
        assert_eq!(
            validate_field(Field::Phone, &values, AuthMode::Register),
            Some(FieldError::InvalidPhone)
        );
    }

    #[test]
    fn test_empty_login_reports_every_field() {
        let errors = validate_auth_form(&AuthFormValues::default(), AuthMode::Login).unwrap_err();
        let collected: Vec<_> = errors.iter().collect();
        assert_eq!(
            collected,
            vec![
                (Field::Email, FieldError::EmailRequired),
                (Field::Password, FieldError::PasswordRequired),
            ]
        );
    }

    #[test]
    fn test_field_errors_update_one_at_a_time() {
        let mut errors = FormErrors::default();
        let values = AuthFormValues {
            email: "nope".to_string(),
            ..Default::default()
        };

        // Blur on email
        errors.set(
            Field::Email,
            validate_field(Field::Email, &values, AuthMode::Login),
        );
        assert_eq!(errors.get(Field::Email), Some(FieldError::InvalidEmail));
        assert_eq!(errors.get(Field::Password), None);

        // Editing the field clears its message
        errors.clear(Field::Email);
        assert!(errors.is_empty());

        errors.set(Field::Password, Some(FieldError::PasswordRequired));
        errors.set(Field::Password, None);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_mode_is_chosen_once() {
        let mut mode = AuthMode::default();
        assert_eq!(mode, AuthMode::Unset);

        assert!(mode.choose(AuthMode::Register));
        assert_eq!(mode, AuthMode::Register);

        assert!(!mode.choose(AuthMode::Login));
        assert!(!mode.choose(AuthMode::Unset));
        assert_eq!(mode, AuthMode::Register);
    }

    #[test]
    fn test_unset_cannot_be_chosen() {
        let mut mode = AuthMode::Unset;
        assert!(!mode.choose(AuthMode::Unset));
        assert_eq!(mode, AuthMode::Unset);
    }

    #[test]
    fn test_password_reset_mismatch() {
        let values = PasswordResetValues {
            current_password: "old-secret".to_string(),
            new_password: "new-secret".to_string(),
            confirm_password: "new-secreT".to_string(),
        };
        assert_eq!(
            validate_password_reset(&values),
            Err(PasswordResetError::Mismatch)
        );
    }

    #[test]
    fn test_password_reset_leaves_rest_to_server() {
        // Empty and short passwords are not checked client-side
        assert!(validate_password_reset(&PasswordResetValues::default()).is_ok());

        let values = PasswordResetValues {
            current_password: String::new(),
            new_password: "x".to_string(),
            confirm_password: "x".to_string(),
        };
        assert!(validate_password_reset(&values).is_ok());
    }
}
