//! Integration tests for Registra.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p registra-cli -- migrate
//!
//! # Start the server
//! cargo run -p registra-server
//!
//! # Run integration tests
//! cargo test -p registra-integration-tests -- --ignored
//! ```
//!
//! All tests are `#[ignore]`d by default because they require a running
//! server and database. Tests that exercise the setup flow reset the
//! account tables, so point them at a disposable database.

use reqwest::Client;
use sqlx::PgPool;

/// Base URL for the server (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("REGISTRA_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Connect to the test database.
///
/// # Panics
///
/// Panics if the database URL is missing or the connection fails.
pub async fn connect_db() -> PgPool {
    let database_url = std::env::var("REGISTRA_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("REGISTRA_DATABASE_URL must be set for integration tests");

    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test database")
}

/// Create an HTTP client with a cookie store for session handling.
///
/// # Panics
///
/// Panics if the client cannot be built.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Remove all accounts and role assignments so the setup flow starts fresh.
///
/// Role assignments and sessions cascade or become orphaned cookie IDs, both
/// fine for tests.
///
/// # Panics
///
/// Panics if the delete fails.
pub async fn reset_accounts(pool: &PgPool) {
    sqlx::query("DELETE FROM account")
        .execute(pool)
        .await
        .expect("Failed to reset account table");
    sqlx::query("DELETE FROM session")
        .execute(pool)
        .await
        .expect("Failed to reset session table");
}

/// Count accounts with the given email.
///
/// # Panics
///
/// Panics if the query fails.
pub async fn count_accounts_with_email(pool: &PgPool, email: &str) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM account WHERE email = $1")
        .bind(email)
        .fetch_one(pool)
        .await
        .expect("Failed to count accounts")
}

/// Grant a role to an account directly, bypassing the HTTP API.
///
/// # Panics
///
/// Panics if the insert fails.
pub async fn grant_role(pool: &PgPool, account_id: i32, role: &str) {
    sqlx::query("INSERT INTO role_assignment (account_id, role) VALUES ($1, $2::app_role)")
        .bind(account_id)
        .bind(role)
        .execute(pool)
        .await
        .expect("Failed to grant role");
}

/// Revoke a role from an account directly.
///
/// # Panics
///
/// Panics if the delete fails.
pub async fn revoke_role(pool: &PgPool, account_id: i32, role: &str) {
    sqlx::query("DELETE FROM role_assignment WHERE account_id = $1 AND role = $2::app_role")
        .bind(account_id)
        .bind(role)
        .execute(pool)
        .await
        .expect("Failed to revoke role");
}
