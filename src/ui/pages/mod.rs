//! Application pages
//!
//! - Auth page (`/`): login and registration
//! - Gallery page (`/home`)
//! - Not found page for everything else

mod auth;
mod gallery;
mod not_found;

pub use auth::AuthPage;
pub use gallery::GalleryPage;
pub use not_found::NotFoundPage;
