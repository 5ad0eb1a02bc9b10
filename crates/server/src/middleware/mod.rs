//! Middleware and extractors.

pub mod auth;
pub mod session;

pub use auth::{AdminGateRejection, RequireAdmin, set_current_user, terminate_session};
pub use session::create_session_layer;
