//! Admin product management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use registra_core::{ProductFeatureId, ProductId, Slug};

use crate::db::products::{ProductFeatureInput, ProductInput, ProductRepository};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Product create/update payload.
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    /// Explicit slug; derived from the name when omitted.
    #[serde(default)]
    pub slug: Option<String>,
    pub name: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub full_description: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub demo_link: Option<String>,
    #[serde(default)]
    pub download_link: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub order_index: i32,
}

const fn default_true() -> bool {
    true
}

impl ProductPayload {
    fn into_input(self) -> Result<ProductInput, AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("name is required".to_owned()));
        }

        let slug = match &self.slug {
            Some(s) => Slug::parse(s),
            None => Slug::from_title(&self.name),
        }
        .map_err(|e| AppError::BadRequest(format!("invalid slug: {e}")))?;

        Ok(ProductInput {
            slug,
            name: self.name.trim().to_owned(),
            short_description: self.short_description,
            full_description: self.full_description,
            price: self.price,
            image_url: self.image_url,
            demo_link: self.demo_link,
            download_link: self.download_link,
            is_active: self.is_active,
            is_featured: self.is_featured,
            order_index: self.order_index,
        })
    }
}

/// Product feature payload.
#[derive(Debug, Deserialize)]
pub struct ProductFeaturePayload {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub order_index: i32,
}

/// List all products including inactive ones.
///
/// GET /admin/api/products
#[instrument(skip(state))]
pub async fn list(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let products = ProductRepository::new(state.pool()).list_all().await?;
    Ok(Json(products))
}

/// Create a product.
///
/// POST /admin/api/products
#[instrument(skip(state, payload))]
pub async fn create(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    let input = payload.into_input()?;
    let product = ProductRepository::new(state.pool()).create(&input).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace a product.
///
/// PUT /admin/api/products/{id}
#[instrument(skip(state, payload))]
pub async fn update(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    let input = payload.into_input()?;
    let product = ProductRepository::new(state.pool())
        .update(ProductId::new(id), &input)
        .await?;

    Ok(Json(product))
}

/// Delete a product and its features.
///
/// DELETE /admin/api/products/{id}
#[instrument(skip(state))]
pub async fn delete(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// List a product's features.
///
/// GET /admin/api/products/{id}/features
#[instrument(skip(state))]
pub async fn list_features(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let features = ProductRepository::new(state.pool())
        .list_features(ProductId::new(id))
        .await?;

    Ok(Json(features))
}

/// Add a feature to a product.
///
/// POST /admin/api/products/{id}/features
#[instrument(skip(state, payload))]
pub async fn create_feature(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ProductFeaturePayload>,
) -> Result<impl IntoResponse, AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::BadRequest("title is required".to_owned()));
    }

    let input = ProductFeatureInput {
        title: payload.title.trim().to_owned(),
        description: payload.description,
        icon: payload.icon,
        order_index: payload.order_index,
    };

    let feature = ProductRepository::new(state.pool())
        .create_feature(ProductId::new(id), &input)
        .await?;

    Ok((StatusCode::CREATED, Json(feature)))
}

/// Remove a feature from a product.
///
/// DELETE /admin/api/products/{id}/features/{feature_id}
#[instrument(skip(state))]
pub async fn delete_feature(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path((id, feature_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, AppError> {
    ProductRepository::new(state.pool())
        .delete_feature(ProductFeatureId::new(feature_id), ProductId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
