//! Public content API route handlers.
//!
//! Read-only JSON endpoints consumed by the marketing site. Drafts and
//! inactive rows are never visible here.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use registra_core::{Email, EmailError, Slug};

use crate::db::{
    ArticleRepository, ContactMessageRepository, ContentRepository, ProductRepository,
    SettingsRepository,
};
use crate::error::AppError;
use crate::models::{Product, ProductFeature};
use crate::state::AppState;

/// Get the active hero block.
///
/// GET /api/hero
#[instrument(skip(state))]
pub async fn hero(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let hero = ContentRepository::new(state.pool()).get_active_hero().await?;
    Ok(Json(hero))
}

/// List active feature cards.
///
/// GET /api/features
#[instrument(skip(state))]
pub async fn features(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let features = ContentRepository::new(state.pool())
        .list_active_features()
        .await?;
    Ok(Json(features))
}

/// List active testimonials.
///
/// GET /api/testimonials
#[instrument(skip(state))]
pub async fn testimonials(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let testimonials = ContentRepository::new(state.pool())
        .list_active_testimonials()
        .await?;
    Ok(Json(testimonials))
}

/// List published articles.
///
/// GET /api/articles
#[instrument(skip(state))]
pub async fn articles(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let articles = ArticleRepository::new(state.pool()).list_published().await?;
    Ok(Json(articles))
}

/// Get a published article by slug.
///
/// GET /api/articles/{slug}
#[instrument(skip(state))]
pub async fn article_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let slug = Slug::parse(&slug).map_err(|_| AppError::NotFound("article not found".to_owned()))?;

    let article = ArticleRepository::new(state.pool())
        .get_published_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("article not found".to_owned()))?;

    Ok(Json(article))
}

/// A product together with its feature list.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub features: Vec<ProductFeature>,
}

/// List active products.
///
/// GET /api/products
#[instrument(skip(state))]
pub async fn products(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let products = ProductRepository::new(state.pool()).list_active().await?;
    Ok(Json(products))
}

/// Get an active product with its features by slug.
///
/// GET /api/products/{slug}
#[instrument(skip(state))]
pub async fn product_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let slug = Slug::parse(&slug).map_err(|_| AppError::NotFound("product not found".to_owned()))?;

    let repo = ProductRepository::new(state.pool());
    let product = repo
        .get_active_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("product not found".to_owned()))?;
    let features = repo.list_features(product.id).await?;

    Ok(Json(ProductDetail { product, features }))
}

/// Get all site settings as a JSON object.
///
/// GET /api/settings
#[instrument(skip(state))]
pub async fn settings(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let settings = SettingsRepository::new(state.pool()).get_all().await?;
    Ok(Json(settings))
}

/// Contact form payload.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

/// Normalize the optional contact email: blank means absent, anything else
/// must parse as a valid address.
fn contact_email(raw: Option<&str>) -> Result<Option<Email>, EmailError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => Email::parse(s).map(Some),
    }
}

/// Submit the public contact form.
///
/// POST /api/contact
#[instrument(skip(state, form), fields(name = %form.name))]
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<impl IntoResponse, AppError> {
    if form.name.trim().is_empty() || form.message.trim().is_empty() {
        return Err(AppError::BadRequest(
            "name and message are required".to_owned(),
        ));
    }

    let email = contact_email(form.email.as_deref())
        .map_err(|e| AppError::BadRequest(format!("invalid email address: {e}")))?;

    let message = ContactMessageRepository::new(state.pool())
        .create(
            form.name.trim(),
            email.as_ref().map(Email::as_str),
            form.phone.as_deref().map(str::trim),
            form.subject.as_deref().map(str::trim),
            form.message.trim(),
        )
        .await?;

    tracing::info!(message_id = message.id.as_i32(), "contact submission stored");

    Ok((StatusCode::CREATED, Json(message)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_email_absent_or_blank() {
        assert_eq!(contact_email(None).unwrap(), None);
        assert_eq!(contact_email(Some("")).unwrap(), None);
        assert_eq!(contact_email(Some("   ")).unwrap(), None);
    }

    #[test]
    fn test_contact_email_normalized() {
        let email = contact_email(Some("  Visitor@Example.COM ")).unwrap().unwrap();
        assert_eq!(email.as_str(), "visitor@example.com");
    }

    #[test]
    fn test_contact_email_rejects_garbage() {
        assert!(contact_email(Some("not-an-email")).is_err());
        assert!(contact_email(Some("a@")).is_err());
    }
}
