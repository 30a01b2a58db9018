//! Common reusable UI components
//!
//! Building blocks shared by the auth form and the gallery.

pub mod button;
pub mod form;
pub mod message;
pub mod modal;
pub mod spinner;

pub use button::{Button, ButtonVariant};
pub use form::FormField;
pub use message::{ErrorMessage, SuccessMessage};
pub use modal::BaseModal;
pub use spinner::{LoadingSpinner, Spinner, SpinnerSize};
