//! Domain models for the server.
//!
//! These types represent validated domain objects separate from database
//! row types.

pub mod account;
pub mod content;
pub mod session;

pub use account::{Account, RoleAssignment};
pub use content::{Article, ContactMessage, Feature, HeroContent, Product, ProductFeature, Testimonial};
pub use session::{CurrentUser, keys as session_keys};
