//! Core types for Registra.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod role;
pub mod slug;

pub use email::{Email, EmailError};
pub use id::*;
pub use role::Role;
pub use slug::{Slug, SlugError};
