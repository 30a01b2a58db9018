//! Gallery API wire types and error taxonomy
//!
//! Shared by the browser client and the server-side proxy. Browser requests go
//! to `/api/...`; the proxy strips the prefix and forwards to the upstream.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::gallery::ImageRef;
use super::validation::{AuthFormValues, PasswordResetValues};

/// Path prefix under which the browser reaches the gallery API
pub const API_PREFIX: &str = "/api";

/// Multipart field name for uploaded files
pub const UPLOAD_FIELD: &str = "image";

pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";
pub const RESET_PASSWORD_FAILED_MESSAGE: &str = "Error resetting password";
pub const RESET_PASSWORD_SUCCESS_MESSAGE: &str = "Password reset successfully";
pub const REGISTRATION_SUCCESS_MESSAGE: &str = "Registration successful. You can now log in.";
pub const ORDER_SAVE_FAILED_MESSAGE: &str = "Could not save the new image order.";

/// Upstream endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Login,
    Signup,
    ResetPassword { user_id: String },
    Images,
    Upload,
    UpdateOrder,
}

impl Endpoint {
    /// Path on the upstream API
    pub fn path(&self) -> String {
        match self {
            Endpoint::Login => "/login".to_string(),
            Endpoint::Signup => "/signup".to_string(),
            Endpoint::ResetPassword { user_id } => format!("/resetPassword/{user_id}"),
            Endpoint::Images => "/getImage".to_string(),
            Endpoint::Upload => "/image".to_string(),
            Endpoint::UpdateOrder => "/updateImageOrder".to_string(),
        }
    }

    /// Same-origin URL used by the browser
    pub fn url(&self) -> String {
        format!("{API_PREFIX}{}", self.path())
    }

    /// Whether the call only makes sense with a session
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Endpoint::Login | Endpoint::Signup)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl From<&AuthFormValues> for LoginRequest {
    fn from(values: &AuthFormValues) -> Self {
        Self {
            email: values.email.trim().to_string(),
            password: values.password.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
}

impl From<&AuthFormValues> for SignupRequest {
    fn from(values: &AuthFormValues) -> Self {
        Self {
            email: values.email.trim().to_string(),
            password: values.password.clone(),
            confirm_password: values.confirm_password.clone(),
            phone: values.phone.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl From<&PasswordResetValues> for ResetPasswordRequest {
    fn from(values: &PasswordResetValues) -> Self {
        Self {
            current_password: values.current_password.clone(),
            new_password: values.new_password.clone(),
            confirm_password: values.confirm_password.clone(),
        }
    }
}

/// One stored image as the API reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub image: ImageRef,
}

/// Response of `GET /getImage` and `POST /image`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageListResponse {
    #[serde(default)]
    pub images: Vec<ImageEntry>,
}

impl ImageListResponse {
    pub fn into_refs(self) -> Vec<ImageRef> {
        self.images.into_iter().map(|entry| entry.image).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrderRequest {
    pub images: Vec<ImageRef>,
}

/// `{message}` body used for errors and plain acknowledgements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMessage {
    pub message: String,
}

impl ServerMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request rejected with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },

    #[error("could not read response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a rejection from a non-2xx response body
    pub fn rejected(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ServerMessage>(body)
            .ok()
            .map(|m| m.message)
            .filter(|m| !m.trim().is_empty());
        ApiError::Rejected { status, message }
    }

    /// Text to show the user: the server's message if it sent one, else `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Rejected { status: 401, .. })
    }
}
