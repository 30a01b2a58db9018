//! Persisted login payload in localStorage
//!
//! The payload returned by `POST /login` is stored verbatim as JSON under
//! [`TOKEN_STORAGE_KEY`]. All reads are synchronous.

use thiserror::Error;

use crate::core::session::{Credential, LoginPayload};
#[cfg(not(feature = "ssr"))]
use crate::core::session::TOKEN_STORAGE_KEY;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("No window available")]
    NoWindow,
    #[error("localStorage not available")]
    Unavailable,
    #[error("Failed to encode session: {0}")]
    Encode(String),
    #[error("Failed to write to localStorage")]
    Write,
}

#[cfg(not(feature = "ssr"))]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    let window = web_sys::window().ok_or(StorageError::NoWindow)?;
    window
        .local_storage()
        .map_err(|_| StorageError::Unavailable)?
        .ok_or(StorageError::Unavailable)
}

/// Raw persisted value, if any
#[cfg(not(feature = "ssr"))]
pub fn read_raw() -> Option<String> {
    local_storage().ok()?.get_item(TOKEN_STORAGE_KEY).ok()?
}

/// Current unix time in seconds
#[cfg(not(feature = "ssr"))]
fn now() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}

/// Inspect the persisted value. Expired and malformed values are removed.
#[cfg(not(feature = "ssr"))]
pub fn read_credential() -> Credential {
    let credential = Credential::inspect(read_raw().as_deref(), now());
    if credential.is_stale() {
        leptos::logging::warn!("Discarding {:?} session token", credential.status());
        if let Err(e) = clear() {
            leptos::logging::error!("Failed to discard session token: {}", e);
        }
    }
    credential
}

/// Token for the `Authorization` header, if a usable session is stored
#[cfg(not(feature = "ssr"))]
pub fn bearer_token() -> Option<String> {
    read_credential().into_session().map(|session| session.token)
}

#[cfg(not(feature = "ssr"))]
pub fn persist(payload: &LoginPayload) -> Result<(), StorageError> {
    let json = serde_json::to_string(payload).map_err(|e| StorageError::Encode(e.to_string()))?;
    local_storage()?
        .set_item(TOKEN_STORAGE_KEY, &json)
        .map_err(|_| StorageError::Write)
}

#[cfg(not(feature = "ssr"))]
pub fn clear() -> Result<(), StorageError> {
    local_storage()?
        .remove_item(TOKEN_STORAGE_KEY)
        .map_err(|_| StorageError::Write)
}

/// SSR stubs - the server never sees browser storage
#[cfg(feature = "ssr")]
pub fn read_raw() -> Option<String> {
    None
}

#[cfg(feature = "ssr")]
pub fn read_credential() -> Credential {
    Credential::Absent
}

#[cfg(feature = "ssr")]
pub fn bearer_token() -> Option<String> {
    None
}

#[cfg(feature = "ssr")]
pub fn persist(_payload: &LoginPayload) -> Result<(), StorageError> {
    Ok(())
}

#[cfg(feature = "ssr")]
pub fn clear() -> Result<(), StorageError> {
    Ok(())
}
