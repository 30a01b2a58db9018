//! Core domain logic: session, validation, gallery ordering and the API contract

pub mod api;
#[cfg(feature = "ssr")]
pub mod config;
pub mod gallery;
#[cfg(feature = "ssr")]
pub mod proxy;
pub mod reorder;
pub mod routes;
pub mod session;
pub mod validation;

pub use api::{ApiError, Endpoint};
pub use gallery::{Gallery, ImageRef, MutationId, OrderUpdate, SyncStatus};
pub use reorder::{DragGesture, Reorder, move_item};
pub use routes::{AUTH_PATH, GALLERY_PATH, Gate, GuardDecision};
pub use session::{
    Credential, LoginPayload, Session, SessionAction, SessionState, TOKEN_STORAGE_KEY,
    TokenStatus, User,
};
pub use validation::{
    AuthFormValues, AuthMode, Field, FieldError, FormErrors, PasswordResetError,
    PasswordResetValues,
};
