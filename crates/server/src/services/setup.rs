//! First-run setup service.
//!
//! Creates the initial administrator account. The flow is deliberately
//! conservative: it refuses to run once any admin exists, and it rolls back
//! the account row if the admin grant fails partway so a retry starts from a
//! clean slate.

use sqlx::PgPool;
use thiserror::Error;

use registra_core::{Email, Role};

use crate::db::accounts::AccountRepository;
use crate::db::roles::RoleRepository;
use crate::db::RepositoryError;
use crate::models::Account;
use crate::services::auth::{self, AuthError};

/// Errors that can occur during first-run setup.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Email or password missing from the request.
    #[error("email and password are required")]
    MissingCredentials,

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] registra_core::EmailError),

    /// Password too weak.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// An admin account already exists.
    #[error("an admin account already exists")]
    AdminAlreadyExists,

    /// The email is already registered to another account.
    #[error("email already registered")]
    EmailTaken,

    /// The admin grant failed and the account was rolled back.
    #[error("failed to grant admin privileges")]
    GrantFailed(#[source] RepositoryError),

    /// Password hashing failure.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// First-run setup service.
pub struct SetupService<'a> {
    pool: &'a PgPool,
}

impl<'a> SetupService<'a> {
    /// Create a new setup service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create the first admin account.
    ///
    /// The sequence is: validate input, check no admin exists, create the
    /// account, grant the admin role. The existence check is a fast path;
    /// the real guarantee is the partial unique index on the admin role,
    /// which makes concurrent bootstrap attempts race to a single winner.
    /// When the grant fails the freshly created account is deleted again so
    /// the operation never leaves a role-less account behind.
    ///
    /// # Errors
    ///
    /// Returns `SetupError::MissingCredentials` if email or password is empty.
    /// Returns `SetupError::InvalidEmail` or `SetupError::WeakPassword` if
    /// validation fails.
    /// Returns `SetupError::AdminAlreadyExists` if an admin is already set up,
    /// including when a concurrent request won the race.
    /// Returns `SetupError::GrantFailed` if the role grant failed for another
    /// reason; the account has been rolled back.
    pub async fn bootstrap_admin(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Account, SetupError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(SetupError::MissingCredentials);
        }

        let email = Email::parse(email)?;
        auth::validate_password(password).map_err(|e| match e {
            AuthError::WeakPassword(msg) => SetupError::WeakPassword(msg),
            _ => SetupError::WeakPassword("invalid password".to_owned()),
        })?;

        let roles = RoleRepository::new(self.pool);
        if roles.admin_exists().await? {
            return Err(SetupError::AdminAlreadyExists);
        }

        let password_hash =
            auth::hash_password(password).map_err(|_| SetupError::PasswordHash)?;

        let accounts = AccountRepository::new(self.pool);
        let account = accounts
            .create(&email, &password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => SetupError::EmailTaken,
                other => SetupError::Repository(other),
            })?;

        if let Err(grant_err) = roles.assign(account.id, Role::Admin).await {
            // Roll back the orphaned account before reporting the failure.
            if let Err(delete_err) = accounts.delete(account.id).await {
                tracing::error!(
                    account_id = account.id.as_i32(),
                    error = %delete_err,
                    "failed to roll back account after admin grant failure"
                );
            }

            return Err(match grant_err {
                // Lost the race: another request created the admin between
                // our existence check and the insert.
                RepositoryError::Conflict(_) => SetupError::AdminAlreadyExists,
                other => SetupError::GrantFailed(other),
            });
        }

        tracing::info!(
            account_id = account.id.as_i32(),
            email = %account.email,
            "admin account created"
        );

        Ok(account)
    }
}
