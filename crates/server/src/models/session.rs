//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use registra_core::{AccountId, Email};

/// Session-stored identity.
///
/// Minimal data stored in the session to identify the logged-in account.
/// Holding a session does NOT imply admin access; the authorization gate
/// re-checks the role against the database on every admin request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Account's database ID.
    pub id: AccountId,
    /// Account's email address.
    pub email: Email,
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in account.
    pub const CURRENT_USER: &str = "current_user";
}
