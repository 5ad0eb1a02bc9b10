//! Integration tests for the admin authorization gate.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p registra-server)
//!
//! Run with: cargo test -p registra-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use reqwest::{Client, StatusCode};
use serde_json::json;

use registra_integration_tests::{
    base_url, client, connect_db, grant_role, reset_accounts, revoke_role,
};

const ADMIN_EMAIL: &str = "gate-admin@example.com";
const ADMIN_PASSWORD: &str = "gate-admin-password";

/// Bootstrap an admin and return its account ID.
async fn bootstrap_admin(client: &Client) -> i32 {
    let resp = client
        .post(format!("{}/api/setup-admin", base_url()))
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let pool = connect_db().await;
    sqlx::query_scalar::<_, i32>("SELECT id FROM account WHERE email = $1")
        .bind(ADMIN_EMAIL)
        .fetch_one(&pool)
        .await
        .unwrap()
}

/// Log in and keep the session cookie in the client's store.
async fn login(client: &Client, email: &str, password: &str) -> StatusCode {
    client
        .post(format!("{}/auth/login", base_url()))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .unwrap()
        .status()
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_admin_api_rejects_anonymous_requests() {
    let client = client();

    let resp = client
        .get(format!("{}/admin/api/articles", base_url()))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_admin_can_login_and_use_admin_api() {
    let pool = connect_db().await;
    reset_accounts(&pool).await;

    let client = client();
    bootstrap_admin(&client).await;

    assert_eq!(login(&client, ADMIN_EMAIL, ADMIN_PASSWORD).await, StatusCode::OK);

    let resp = client
        .get(format!("{}/admin/api/articles", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    reset_accounts(&pool).await;
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_login_rejects_wrong_password() {
    let pool = connect_db().await;
    reset_accounts(&pool).await;

    let client = client();
    bootstrap_admin(&client).await;

    assert_eq!(
        login(&client, ADMIN_EMAIL, "wrong-password").await,
        StatusCode::UNAUTHORIZED
    );

    reset_accounts(&pool).await;
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_gate_locks_out_revoked_admin_on_next_request() {
    let pool = connect_db().await;
    reset_accounts(&pool).await;

    let client = client();
    let account_id = bootstrap_admin(&client).await;

    assert_eq!(login(&client, ADMIN_EMAIL, ADMIN_PASSWORD).await, StatusCode::OK);

    // Works while the role is held.
    let resp = client
        .get(format!("{}/admin/api/articles", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // Revoke the role behind the session's back. The very next request must
    // be denied: the gate re-checks the database, it doesn't trust the
    // session.
    revoke_role(&pool, account_id, "admin").await;

    let resp = client
        .get(format!("{}/admin/api/articles", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // The deny destroyed the session: re-granting the role doesn't revive
    // the old cookie.
    grant_role(&pool, account_id, "admin").await;

    let resp = client
        .get(format!("{}/admin/api/articles", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // A fresh login works again.
    assert_eq!(login(&client, ADMIN_EMAIL, ADMIN_PASSWORD).await, StatusCode::OK);
    let resp = client
        .get(format!("{}/admin/api/articles", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    reset_accounts(&pool).await;
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_editor_account_cannot_use_admin_api() {
    let pool = connect_db().await;
    reset_accounts(&pool).await;

    let client = client();
    let admin_id = bootstrap_admin(&client).await;

    // Demote the account to editor only.
    revoke_role(&pool, admin_id, "admin").await;
    grant_role(&pool, admin_id, "editor").await;

    // Login succeeds: credentials are valid.
    assert_eq!(login(&client, ADMIN_EMAIL, ADMIN_PASSWORD).await, StatusCode::OK);

    // But the admin API is closed.
    let resp = client
        .get(format!("{}/admin/api/articles", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    reset_accounts(&pool).await;
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_logout_destroys_session() {
    let pool = connect_db().await;
    reset_accounts(&pool).await;

    let client = client();
    bootstrap_admin(&client).await;
    assert_eq!(login(&client, ADMIN_EMAIL, ADMIN_PASSWORD).await, StatusCode::OK);

    let resp = client
        .post(format!("{}/auth/logout", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/admin/api/articles", base_url()))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    reset_accounts(&pool).await;
}
