//! Account and role domain types.

use chrono::{DateTime, Utc};

use registra_core::{AccountId, Email, Role, RoleAssignmentId};

/// An authenticated identity issued by the account store (domain type).
///
/// The password hash never leaves the repository layer; see
/// `AccountRepository::get_with_password_hash`.
#[derive(Debug, Clone)]
pub struct Account {
    /// Unique account ID.
    pub id: AccountId,
    /// Account's email address.
    pub email: Email,
    /// Whether the email is confirmed. Bootstrap-created accounts are
    /// confirmed up front (no verification round trip before first login).
    pub email_confirmed: bool,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A record granting an [`Account`] a named role (domain type).
///
/// An account may hold zero or more assignments; holding the `admin` role is
/// what the authorization gate checks on every admin request.
#[derive(Debug, Clone)]
pub struct RoleAssignment {
    /// Database ID of this assignment.
    pub id: RoleAssignmentId,
    /// Account the role is bound to.
    pub account_id: AccountId,
    /// The granted role.
    pub role: Role,
    /// When the role was granted.
    pub created_at: DateTime<Utc>,
}
