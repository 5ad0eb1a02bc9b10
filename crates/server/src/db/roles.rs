//! Role assignment repository for database operations.
//!
//! Roles are granted as `(account_id, role)` rows. A partial unique index on
//! `role = 'admin'` guarantees at most one admin row exists no matter how many
//! setup requests race each other.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use registra_core::{AccountId, Role, RoleAssignmentId};

use super::RepositoryError;
use crate::models::RoleAssignment;

/// Internal row type for `PostgreSQL` role assignment queries.
#[derive(Debug, sqlx::FromRow)]
struct RoleAssignmentRow {
    id: i32,
    account_id: i32,
    role: Role,
    created_at: DateTime<Utc>,
}

impl From<RoleAssignmentRow> for RoleAssignment {
    fn from(row: RoleAssignmentRow) -> Self {
        Self {
            id: RoleAssignmentId::new(row.id),
            account_id: AccountId::new(row.account_id),
            role: row.role,
            created_at: row.created_at,
        }
    }
}

/// Repository for role assignment database operations.
pub struct RoleRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RoleRepository<'a> {
    /// Create a new role repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Check whether any account holds the admin role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn admin_exists(&self) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT 1 FROM role_assignment WHERE role = 'admin'
            )
            ",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Grant a role to an account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the account already holds the
    /// role, or if the role is `admin` and another account already holds it
    /// (enforced by the partial unique index).
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn assign(
        &self,
        account_id: AccountId,
        role: Role,
    ) -> Result<RoleAssignment, RepositoryError> {
        let row = sqlx::query_as::<_, RoleAssignmentRow>(
            r"
            INSERT INTO role_assignment (account_id, role)
            VALUES ($1, $2)
            RETURNING id, account_id, role, created_at
            ",
        )
        .bind(account_id.as_i32())
        .bind(role)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_sqlx(e, "role already assigned"))?;

        Ok(row.into())
    }

    /// Check whether an account holds a specific role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn has_role(
        &self,
        account_id: AccountId,
        role: Role,
    ) -> Result<bool, RepositoryError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS (
                SELECT 1 FROM role_assignment
                WHERE account_id = $1 AND role = $2
            )
            ",
        )
        .bind(account_id.as_i32())
        .bind(role)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }
}
