//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Health check
//!
//! # Setup (one-time)
//! POST /api/setup-admin                 - Create the first admin account
//!
//! # Auth
//! POST /auth/login                      - Login with email/password
//! POST /auth/logout                     - Logout and destroy session
//!
//! # Public content API
//! GET  /api/hero                        - Active hero block
//! GET  /api/features                    - Active feature cards
//! GET  /api/testimonials                - Active testimonials
//! GET  /api/articles                    - Published articles
//! GET  /api/articles/{slug}             - Published article detail
//! GET  /api/products                    - Active products
//! GET  /api/products/{slug}             - Active product with features
//! GET  /api/settings                    - Site settings
//! POST /api/contact                     - Contact form submission
//!
//! # Admin API (requires admin role)
//! GET  /admin/api/articles              - All articles including drafts
//! POST /admin/api/articles              - Create article
//! PUT  /admin/api/articles/{id}         - Replace article
//! DELETE /admin/api/articles/{id}       - Delete article
//! GET  /admin/api/products              - All products
//! POST /admin/api/products              - Create product
//! PUT  /admin/api/products/{id}         - Replace product
//! DELETE /admin/api/products/{id}       - Delete product
//! GET  /admin/api/products/{id}/features          - Product features
//! POST /admin/api/products/{id}/features          - Add product feature
//! DELETE /admin/api/products/{id}/features/{fid}  - Remove product feature
//! GET  /admin/api/hero                  - All hero blocks
//! POST /admin/api/hero                  - Create hero block
//! PUT  /admin/api/hero/{id}             - Replace hero block
//! GET  /admin/api/features              - All feature cards
//! POST /admin/api/features              - Create feature card
//! PUT  /admin/api/features/{id}         - Replace feature card
//! DELETE /admin/api/features/{id}       - Delete feature card
//! GET  /admin/api/testimonials          - All testimonials
//! POST /admin/api/testimonials          - Create testimonial
//! PUT  /admin/api/testimonials/{id}     - Replace testimonial
//! DELETE /admin/api/testimonials/{id}   - Delete testimonial
//! GET  /admin/api/messages              - Contact inbox
//! POST /admin/api/messages/{id}/read    - Mark submission read
//! DELETE /admin/api/messages/{id}       - Delete submission
//! GET  /admin/api/settings              - All settings
//! PUT  /admin/api/settings              - Upsert settings
//! DELETE /admin/api/settings/{key}      - Delete setting
//! ```

pub mod admin;
pub mod auth;
pub mod content;
pub mod setup;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create the public API router.
///
/// The setup endpoint carries a permissive CORS layer so the first-run page
/// can call it from a different origin during provisioning.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/setup-admin",
            post(setup::setup_admin).layer(CorsLayer::permissive()),
        )
        .route("/hero", get(content::hero))
        .route("/features", get(content::features))
        .route("/testimonials", get(content::testimonials))
        .route("/articles", get(content::articles))
        .route("/articles/{slug}", get(content::article_by_slug))
        .route("/products", get(content::products))
        .route("/products/{slug}", get(content::product_by_slug))
        .route("/settings", get(content::settings))
        .route("/contact", post(content::submit_contact))
}

/// Create the admin API router.
pub fn admin_api_routes() -> Router<AppState> {
    Router::new()
        // Articles
        .route(
            "/articles",
            get(admin::articles::list).post(admin::articles::create),
        )
        .route(
            "/articles/{id}",
            put(admin::articles::update).delete(admin::articles::delete),
        )
        // Products
        .route(
            "/products",
            get(admin::products::list).post(admin::products::create),
        )
        .route(
            "/products/{id}",
            put(admin::products::update).delete(admin::products::delete),
        )
        .route(
            "/products/{id}/features",
            get(admin::products::list_features).post(admin::products::create_feature),
        )
        .route(
            "/products/{id}/features/{feature_id}",
            delete(admin::products::delete_feature),
        )
        // Hero
        .route(
            "/hero",
            get(admin::content::list_heroes).post(admin::content::create_hero),
        )
        .route("/hero/{id}", put(admin::content::update_hero))
        // Feature cards
        .route(
            "/features",
            get(admin::content::list_features).post(admin::content::create_feature),
        )
        .route(
            "/features/{id}",
            put(admin::content::update_feature).delete(admin::content::delete_feature),
        )
        // Testimonials
        .route(
            "/testimonials",
            get(admin::content::list_testimonials).post(admin::content::create_testimonial),
        )
        .route(
            "/testimonials/{id}",
            put(admin::content::update_testimonial).delete(admin::content::delete_testimonial),
        )
        // Contact inbox
        .route("/messages", get(admin::messages::list))
        .route("/messages/{id}/read", post(admin::messages::mark_read))
        .route("/messages/{id}", delete(admin::messages::delete))
        // Settings
        .route(
            "/settings",
            get(admin::settings::list).put(admin::settings::update),
        )
        .route("/settings/{key}", delete(admin::settings::delete))
}
