pub mod api_client;
pub mod auth;
pub mod common;
pub mod gallery;
pub mod guards;
pub mod icon;
pub mod pages;
pub mod session;
pub mod storage;

pub use guards::{ProtectedRoute, PublicOnlyRoute};
pub use icon::{Icon, icons};
pub use session::{SessionContext, provide_session_context, use_session};
