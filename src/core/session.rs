//! Session model
//!
//! One authoritative session entity for the whole application:
//! - The login payload persisted in browser storage
//! - Inspection of that payload into an explicit validity state
//! - The in-memory session store and the actions that drive it

use jsonwebtoken::dangerous::insecure_decode;
use serde::{Deserialize, Serialize};

/// Browser storage key holding the persisted login payload
pub const TOKEN_STORAGE_KEY: &str = "jwt";

/// Signed-in user as returned by the authentication API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Body of a successful `POST /login`, persisted verbatim under [`TOKEN_STORAGE_KEY`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginPayload {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
}

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: User,
    pub token: String,
}

impl From<LoginPayload> for Session {
    fn from(payload: LoginPayload) -> Self {
        Session {
            user: payload.user,
            token: payload.token,
        }
    }
}

/// Validity of the persisted token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Valid,
    Expired,
    Absent,
    Malformed,
}

/// Result of inspecting the persisted token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    Valid(Session),
    Expired,
    Absent,
    Malformed,
}

/// Claims we read from JWT-shaped tokens. Everything else is ignored.
#[derive(Debug, Deserialize)]
struct TokenClaims {
    #[serde(default)]
    exp: Option<i64>,
}

impl Credential {
    /// Inspect the raw persisted value at `now` (unix seconds).
    ///
    /// Opaque tokens carry no expiry and are accepted as long as the payload
    /// parses. JWT-shaped tokens must have decodable claims, and an `exp`
    /// claim at or before `now` means the token has expired. The signature is
    /// not checked here; the API remains the authority on that.
    pub fn inspect(raw: Option<&str>, now: i64) -> Self {
        let Some(raw) = raw else {
            return Credential::Absent;
        };

        let payload: LoginPayload = match serde_json::from_str(raw) {
            Ok(payload) => payload,
            Err(_) => return Credential::Malformed,
        };

        if payload.token.trim().is_empty() {
            return Credential::Malformed;
        }

        match token_expiry(&payload.token) {
            Ok(Some(exp)) if exp <= now => Credential::Expired,
            Ok(_) => Credential::Valid(payload.into()),
            Err(_) => Credential::Malformed,
        }
    }

    pub fn status(&self) -> TokenStatus {
        match self {
            Credential::Valid(_) => TokenStatus::Valid,
            Credential::Expired => TokenStatus::Expired,
            Credential::Absent => TokenStatus::Absent,
            Credential::Malformed => TokenStatus::Malformed,
        }
    }

    /// Whether the stored value should be discarded
    pub fn is_stale(&self) -> bool {
        matches!(self, Credential::Expired | Credential::Malformed)
    }

    pub fn into_session(self) -> Option<Session> {
        match self {
            Credential::Valid(session) => Some(session),
            _ => None,
        }
    }
}

/// `exp` of a JWT-shaped token, whatever algorithm signed it
fn token_expiry(token: &str) -> Result<Option<i64>, jsonwebtoken::errors::Error> {
    if token.split('.').count() != 3 {
        return Ok(None);
    }

    let data = insecure_decode::<TokenClaims>(token)?;
    Ok(data.claims.exp)
}

/// In-memory session store
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Storage has not been read yet (server render, before hydration)
    #[default]
    Unknown,
    SignedOut,
    SignedIn(Session),
}

/// Transitions of the session store
#[derive(Debug, Clone)]
pub enum SessionAction {
    /// Re-read from persisted storage
    Restore(Credential),
    /// Successful login
    SignIn(LoginPayload),
    SignOut,
}

impl SessionState {
    pub fn apply(&mut self, action: SessionAction) {
        *self = match action {
            SessionAction::Restore(credential) => credential.into(),
            SessionAction::SignIn(payload) => SessionState::SignedIn(payload.into()),
            SessionAction::SignOut => SessionState::SignedOut,
        };
    }

    pub fn is_login(&self) -> bool {
        matches!(self, SessionState::SignedIn(_))
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, SessionState::Unknown)
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::SignedIn(session) => Some(&session.user),
            _ => None,
        }
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            SessionState::SignedIn(session) => Some(session.token.as_str()),
            _ => None,
        }
    }
}

impl From<Credential> for SessionState {
    fn from(credential: Credential) -> Self {
        match credential.into_session() {
            Some(session) => SessionState::SignedIn(session),
            None => SessionState::SignedOut,
        }
    }
}
