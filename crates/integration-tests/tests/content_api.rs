//! Integration tests for the public content API and admin CRUD.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p registra-server)
//!
//! Run with: cargo test -p registra-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use registra_integration_tests::{base_url, client, connect_db, reset_accounts};

const ADMIN_EMAIL: &str = "content-admin@example.com";
const ADMIN_PASSWORD: &str = "content-admin-password";

/// Bootstrap an admin and log in, returning the authenticated client.
async fn admin_client() -> Client {
    let pool = connect_db().await;
    reset_accounts(&pool).await;

    let client = client();

    let resp = client
        .post(format!("{}/api/setup-admin", base_url()))
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .post(format!("{}/auth/login", base_url()))
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    client
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_public_endpoints_return_json() {
    let client = client();
    let base = base_url();

    for path in [
        "/api/hero",
        "/api/features",
        "/api/testimonials",
        "/api/articles",
        "/api/products",
        "/api/settings",
    ] {
        let resp = client.get(format!("{base}{path}")).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "path: {path}");
        resp.json::<Value>().await.unwrap();
    }
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_draft_articles_are_hidden_from_public_api() {
    let admin = admin_client().await;
    let base = base_url();

    // Create a draft and a published article.
    let resp = admin
        .post(format!("{base}/admin/api/articles"))
        .json(&json!({ "title": "Hidden Draft", "is_published": false }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let draft: Value = resp.json().await.unwrap();

    let resp = admin
        .post(format!("{base}/admin/api/articles"))
        .json(&json!({ "title": "Published Story", "is_published": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let published: Value = resp.json().await.unwrap();
    assert_eq!(published["slug"], json!("published-story"));

    // Public list contains only the published one.
    let articles: Vec<Value> = client()
        .get(format!("{base}/api/articles"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let slugs: Vec<&str> = articles
        .iter()
        .filter_map(|a| a["slug"].as_str())
        .collect();
    assert!(slugs.contains(&"published-story"));
    assert!(!slugs.contains(&"hidden-draft"));

    // Draft detail is a 404 publicly.
    let resp = client()
        .get(format!("{base}/api/articles/hidden-draft"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Cleanup.
    for article in [&draft, &published] {
        let id = article["id"].as_i64().unwrap();
        let resp = admin
            .delete(format!("{base}/admin/api/articles/{id}"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_duplicate_article_slug_conflicts() {
    let admin = admin_client().await;
    let base = base_url();

    let payload = json!({ "title": "Same Title", "slug": "same-title" });

    let resp = admin
        .post(format!("{base}/admin/api/articles"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let article: Value = resp.json().await.unwrap();

    let resp = admin
        .post(format!("{base}/admin/api/articles"))
        .json(&payload)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let id = article["id"].as_i64().unwrap();
    admin
        .delete(format!("{base}/admin/api/articles/{id}"))
        .send()
        .await
        .unwrap();
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_contact_form_submission_reaches_admin_inbox() {
    let admin = admin_client().await;
    let base = base_url();

    // Public submission.
    let resp = client()
        .post(format!("{base}/api/contact"))
        .json(&json!({
            "name": "Prospective Customer",
            "email": "prospect@example.com",
            "message": "How do I get a demo?",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let submitted: Value = resp.json().await.unwrap();
    let id = submitted["id"].as_i64().unwrap();

    // Appears in the admin inbox.
    let messages: Vec<Value> = admin
        .get(format!("{base}/admin/api/messages"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(messages.iter().any(|m| m["id"].as_i64() == Some(id)));

    // Mark read, then delete.
    let resp = admin
        .post(format!("{base}/admin/api/messages/{id}/read"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = admin
        .delete(format!("{base}/admin/api/messages/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_contact_form_requires_name_and_message() {
    let resp = client()
        .post(format!("{}/api/contact", base_url()))
        .json(&json!({ "name": "", "message": "" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_contact_form_rejects_malformed_email() {
    let resp = client()
        .post(format!("{}/api/contact", base_url()))
        .json(&json!({
            "name": "Prospective Customer",
            "email": "not-an-address",
            "message": "How do I get a demo?",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_settings_roundtrip() {
    let admin = admin_client().await;
    let base = base_url();

    let resp = admin
        .put(format!("{base}/admin/api/settings"))
        .json(&json!({ "site_name": "Registra POS", "contact_email": "hello@registra.app" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    // Settings are publicly readable.
    let settings: Value = client()
        .get(format!("{base}/api/settings"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(settings["site_name"], json!("Registra POS"));

    // Cleanup.
    for key in ["site_name", "contact_email"] {
        let resp = admin
            .delete(format!("{base}/admin/api/settings/{key}"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_settings_batch_is_all_or_nothing() {
    let admin = admin_client().await;
    let base = base_url();

    // One bad key must fail the whole batch without committing the good one.
    let resp = admin
        .put(format!("{base}/admin/api/settings"))
        .json(&json!({ "orphan_key": "value", "   ": "blank key" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let settings: Value = client()
        .get(format!("{base}/api/settings"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(settings.get("orphan_key").is_none());
}
