//! Admin API route handlers.
//!
//! Every handler takes the [`crate::middleware::RequireAdmin`] extractor, so
//! the role check runs before any of them touch the database.

pub mod articles;
pub mod content;
pub mod messages;
pub mod products;
pub mod settings;
