//! Integration tests for the first-run admin setup endpoint.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p registra-server)
//!
//! Run with: cargo test -p registra-integration-tests -- --ignored
//!
//! The setup tests reset the account tables between scenarios, so point
//! them at a disposable database.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use registra_integration_tests::{
    base_url, client, connect_db, count_accounts_with_email, reset_accounts,
};

const ADMIN_EMAIL: &str = "admin@example.com";
const ADMIN_PASSWORD: &str = "first-admin-password";

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_setup_creates_admin_then_rejects_second_attempt() {
    let pool = connect_db().await;
    reset_accounts(&pool).await;

    let client = client();
    let url = format!("{}/api/setup-admin", base_url());

    // First call succeeds.
    let resp = client
        .post(&url)
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["email"], json!(ADMIN_EMAIL));

    assert_eq!(count_accounts_with_email(&pool, ADMIN_EMAIL).await, 1);

    // Second call is rejected, even with a different email.
    let resp = client
        .post(&url)
        .json(&json!({ "email": "other@example.com", "password": ADMIN_PASSWORD }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], json!("an admin account already exists"));

    // And no stray account was left behind by the rejected attempt.
    assert_eq!(count_accounts_with_email(&pool, "other@example.com").await, 0);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_setup_rejects_missing_fields() {
    let pool = connect_db().await;
    reset_accounts(&pool).await;

    let client = client();
    let url = format!("{}/api/setup-admin", base_url());

    for payload in [
        json!({}),
        json!({ "email": "", "password": ADMIN_PASSWORD }),
        json!({ "email": ADMIN_EMAIL, "password": "" }),
        json!({ "password": ADMIN_PASSWORD }),
        json!({ "email": ADMIN_EMAIL }),
    ] {
        let resp = client.post(&url).json(&payload).send().await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload: {payload}");
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["error"], json!("email and password are required"));
    }

    // No account was created by any of the rejected attempts.
    assert_eq!(count_accounts_with_email(&pool, ADMIN_EMAIL).await, 0);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_setup_rejects_invalid_email_and_weak_password() {
    let pool = connect_db().await;
    reset_accounts(&pool).await;

    let client = client();
    let url = format!("{}/api/setup-admin", base_url());

    let resp = client
        .post(&url)
        .json(&json!({ "email": "not-an-email", "password": ADMIN_PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client
        .post(&url)
        .json(&json!({ "email": ADMIN_EMAIL, "password": "short" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Setup is still possible afterwards: validation failures don't consume
    // the one-shot.
    let resp = client
        .post(&url)
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    reset_accounts(&pool).await;
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_setup_normalizes_email() {
    let pool = connect_db().await;
    reset_accounts(&pool).await;

    let client = client();
    let url = format!("{}/api/setup-admin", base_url());

    let resp = client
        .post(&url)
        .json(&json!({ "email": "  Admin@Example.COM ", "password": ADMIN_PASSWORD }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["email"], json!("admin@example.com"));

    assert_eq!(count_accounts_with_email(&pool, "admin@example.com").await, 1);

    reset_accounts(&pool).await;
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_concurrent_setup_produces_exactly_one_admin() {
    let pool = connect_db().await;
    reset_accounts(&pool).await;

    let url = format!("{}/api/setup-admin", base_url());

    // Fire several setup requests at once. Exactly one should win; the rest
    // must fail without leaving role-less accounts behind.
    let mut handles = Vec::new();
    for i in 0..5 {
        let url = url.clone();
        handles.push(tokio::spawn(async move {
            client()
                .post(&url)
                .json(&json!({
                    "email": format!("admin{i}@example.com"),
                    "password": ADMIN_PASSWORD,
                }))
                .send()
                .await
                .unwrap()
                .status()
        }));
    }

    let mut ok_count = 0;
    for handle in handles {
        if handle.await.unwrap() == StatusCode::OK {
            ok_count += 1;
        }
    }
    assert_eq!(ok_count, 1);

    let admin_rows =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM role_assignment WHERE role = 'admin'")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(admin_rows, 1);

    // Every surviving account holds a role: losers were rolled back.
    let orphans = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM account a
         WHERE NOT EXISTS (SELECT 1 FROM role_assignment r WHERE r.account_id = a.id)",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(orphans, 0);

    reset_accounts(&pool).await;
}
