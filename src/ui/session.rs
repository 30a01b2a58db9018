//! Reactive session store
//!
//! The single source of truth for who is signed in. Components reach it
//! through [`use_session`]; every change goes through [`SessionAction`] and
//! is mirrored to localStorage by the caller-facing methods here.

use leptos::prelude::*;

use super::storage::{self, StorageError};
use crate::core::routes::{Gate, GuardDecision};
use crate::core::session::{LoginPayload, SessionAction, SessionState, User};

#[derive(Clone, Copy)]
pub struct SessionContext {
    pub state: RwSignal<SessionState>,
}

impl SessionContext {
    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user().cloned())
    }

    /// Id of the signed-in user, read outside reactive tracking
    pub fn user_id_untracked(&self) -> Option<String> {
        self.state.with_untracked(|s| s.user().map(|u| u.id.clone()))
    }

    pub fn decide(&self, gate: Gate) -> GuardDecision {
        self.state.with(|s| gate.decide(s))
    }

    /// Re-read the persisted token. Stale tokens are dropped from storage.
    pub fn revalidate(&self) {
        #[cfg(not(feature = "ssr"))]
        self.dispatch(SessionAction::Restore(storage::read_credential()));
    }

    /// Persist a fresh login payload and mark the session as signed in
    pub fn sign_in(&self, payload: LoginPayload) -> Result<(), StorageError> {
        storage::persist(&payload)?;
        self.dispatch(SessionAction::SignIn(payload));
        Ok(())
    }

    pub fn sign_out(&self) {
        if let Err(e) = storage::clear() {
            leptos::logging::error!("Failed to clear session token: {}", e);
        }
        self.dispatch(SessionAction::SignOut);
    }

    fn dispatch(&self, action: SessionAction) {
        let mut next = self.state.get_untracked();
        next.apply(action);
        // Unchanged sessions must not wake every guard
        if self.state.with_untracked(|current| *current != next) {
            self.state.set(next);
        }
    }
}

/// Provide the session store to the component tree
pub fn provide_session_context() -> SessionContext {
    // Unknown on both server and client until hydration, to avoid a mismatch
    let ctx = SessionContext {
        state: RwSignal::new(SessionState::Unknown),
    };

    #[cfg(not(feature = "ssr"))]
    Effect::new(move |_| ctx.revalidate());

    provide_context(ctx);
    ctx
}

pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}
