//! Business logic services.

pub mod auth;
pub mod setup;

pub use auth::{AuthError, AuthService};
pub use setup::{SetupError, SetupService};
