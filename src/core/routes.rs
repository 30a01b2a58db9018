//! Route table and route guard decisions

use super::session::SessionState;

/// Auth form (login / register)
pub const AUTH_PATH: &str = "/";

/// Image gallery
pub const GALLERY_PATH: &str = "/home";

/// Which side of the authentication boundary a route lives on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Only for visitors without a session; signed-in users go to the gallery
    PublicOnly,
    /// Only for signed-in users; everyone else goes to the auth form
    Protected,
}

/// What a guarded route should do for the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session not read yet
    Pending,
    Render,
    Redirect(&'static str),
}

impl Gate {
    pub fn decide(self, state: &SessionState) -> GuardDecision {
        if !state.is_resolved() {
            return GuardDecision::Pending;
        }
        match (self, state.is_login()) {
            (Gate::PublicOnly, true) => GuardDecision::Redirect(GALLERY_PATH),
            (Gate::PublicOnly, false) => GuardDecision::Render,
            (Gate::Protected, true) => GuardDecision::Render,
            (Gate::Protected, false) => GuardDecision::Redirect(AUTH_PATH),
        }
    }
}
