//! Admin account management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create the first admin account
//! registra-cli admin bootstrap -e admin@example.com -p "secret-password"
//! ```
//!
//! # Environment Variables
//!
//! - `REGISTRA_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection
//!   string

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;
use thiserror::Error;

use registra_core::{Email, Role};

/// Minimum password length, matching the HTTP setup endpoint.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] registra_core::EmailError),

    /// Password too short.
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters")]
    WeakPassword,

    /// Password hashing failure.
    #[error("Password hashing error")]
    PasswordHash,

    /// An admin account already exists.
    #[error("An admin account already exists")]
    AdminExists,
}

/// Create the first admin account.
///
/// Performs the same sequence as the HTTP setup endpoint: check that no admin
/// exists, create the account, grant the admin role. Both statements run in
/// one transaction, so a conflict on the admin role leaves nothing behind.
///
/// # Errors
///
/// Returns [`AdminError`] if validation fails, an admin already exists, or
/// the database rejects the insert.
pub async fn bootstrap(email: &str, password: &str) -> Result<i32, AdminError> {
    dotenvy::dotenv().ok();

    let email = Email::parse(email)?;
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AdminError::WeakPassword);
    }

    let database_url = std::env::var("REGISTRA_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| AdminError::MissingEnvVar("REGISTRA_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(&database_url).await?;

    let admin_exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM role_assignment WHERE role = 'admin')",
    )
    .fetch_one(&pool)
    .await?;

    if admin_exists {
        return Err(AdminError::AdminExists);
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AdminError::PasswordHash)?
        .to_string();

    tracing::info!("Creating admin account: {}", email);

    let mut tx = pool.begin().await?;

    let account_id = sqlx::query_scalar::<_, i32>(
        r"
        INSERT INTO account (email, password_hash, email_confirmed)
        VALUES ($1, $2, TRUE)
        RETURNING id
        ",
    )
    .bind(email.as_str())
    .bind(&password_hash)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO role_assignment (account_id, role) VALUES ($1, $2)")
        .bind(account_id)
        .bind(Role::Admin)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return AdminError::AdminExists;
            }
            AdminError::Database(e)
        })?;

    tx.commit().await?;

    tracing::info!(
        "Admin account created successfully! ID: {}, Email: {}",
        account_id,
        email
    );

    Ok(account_id)
}
