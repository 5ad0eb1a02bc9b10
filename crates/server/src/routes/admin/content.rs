//! Admin home-page content management: hero blocks, feature cards,
//! testimonials.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use registra_core::{FeatureId, HeroContentId, TestimonialId};

use crate::db::content::{ContentRepository, FeatureInput, HeroContentInput, TestimonialInput};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

// -------------------------------------------------------------------------
// Hero
// -------------------------------------------------------------------------

/// Hero block payload.
#[derive(Debug, Deserialize)]
pub struct HeroPayload {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub button_text: Option<String>,
    #[serde(default)]
    pub button_link: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

const fn default_true() -> bool {
    true
}

impl HeroPayload {
    fn into_input(self) -> Result<HeroContentInput, AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::BadRequest("title is required".to_owned()));
        }

        Ok(HeroContentInput {
            title: self.title.trim().to_owned(),
            subtitle: self.subtitle,
            description: self.description,
            button_text: self.button_text,
            button_link: self.button_link,
            image_url: self.image_url,
            is_active: self.is_active,
        })
    }
}

/// List all hero blocks.
///
/// GET /admin/api/hero
#[instrument(skip(state))]
pub async fn list_heroes(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let heroes = ContentRepository::new(state.pool()).list_heroes().await?;
    Ok(Json(heroes))
}

/// Create a hero block.
///
/// POST /admin/api/hero
#[instrument(skip(state, payload))]
pub async fn create_hero(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<HeroPayload>,
) -> Result<impl IntoResponse, AppError> {
    let input = payload.into_input()?;
    let hero = ContentRepository::new(state.pool())
        .create_hero(&input)
        .await?;

    Ok((StatusCode::CREATED, Json(hero)))
}

/// Replace a hero block.
///
/// PUT /admin/api/hero/{id}
#[instrument(skip(state, payload))]
pub async fn update_hero(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<HeroPayload>,
) -> Result<impl IntoResponse, AppError> {
    let input = payload.into_input()?;
    let hero = ContentRepository::new(state.pool())
        .update_hero(HeroContentId::new(id), &input)
        .await?;

    Ok(Json(hero))
}

// -------------------------------------------------------------------------
// Feature cards
// -------------------------------------------------------------------------

/// Feature card payload.
#[derive(Debug, Deserialize)]
pub struct FeaturePayload {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order_index: i32,
}

impl FeaturePayload {
    fn into_input(self) -> Result<FeatureInput, AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::BadRequest("title is required".to_owned()));
        }

        Ok(FeatureInput {
            title: self.title.trim().to_owned(),
            description: self.description,
            icon: self.icon,
            is_active: self.is_active,
            order_index: self.order_index,
        })
    }
}

/// List all feature cards.
///
/// GET /admin/api/features
#[instrument(skip(state))]
pub async fn list_features(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let features = ContentRepository::new(state.pool()).list_features().await?;
    Ok(Json(features))
}

/// Create a feature card.
///
/// POST /admin/api/features
#[instrument(skip(state, payload))]
pub async fn create_feature(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<FeaturePayload>,
) -> Result<impl IntoResponse, AppError> {
    let input = payload.into_input()?;
    let feature = ContentRepository::new(state.pool())
        .create_feature(&input)
        .await?;

    Ok((StatusCode::CREATED, Json(feature)))
}

/// Replace a feature card.
///
/// PUT /admin/api/features/{id}
#[instrument(skip(state, payload))]
pub async fn update_feature(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<FeaturePayload>,
) -> Result<impl IntoResponse, AppError> {
    let input = payload.into_input()?;
    let feature = ContentRepository::new(state.pool())
        .update_feature(FeatureId::new(id), &input)
        .await?;

    Ok(Json(feature))
}

/// Delete a feature card.
///
/// DELETE /admin/api/features/{id}
#[instrument(skip(state))]
pub async fn delete_feature(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ContentRepository::new(state.pool())
        .delete_feature(FeatureId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// -------------------------------------------------------------------------
// Testimonials
// -------------------------------------------------------------------------

/// Testimonial payload.
#[derive(Debug, Deserialize)]
pub struct TestimonialPayload {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    pub content: String,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub order_index: i32,
}

impl TestimonialPayload {
    fn into_input(self) -> Result<TestimonialInput, AppError> {
        if self.name.trim().is_empty() || self.content.trim().is_empty() {
            return Err(AppError::BadRequest(
                "name and content are required".to_owned(),
            ));
        }

        if let Some(rating) = self.rating
            && !(1..=5).contains(&rating)
        {
            return Err(AppError::BadRequest(
                "rating must be between 1 and 5".to_owned(),
            ));
        }

        Ok(TestimonialInput {
            name: self.name.trim().to_owned(),
            role: self.role,
            company: self.company,
            content: self.content.trim().to_owned(),
            rating: self.rating,
            image_url: self.image_url,
            is_active: self.is_active,
            order_index: self.order_index,
        })
    }
}

/// List all testimonials.
///
/// GET /admin/api/testimonials
#[instrument(skip(state))]
pub async fn list_testimonials(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let testimonials = ContentRepository::new(state.pool())
        .list_testimonials()
        .await?;
    Ok(Json(testimonials))
}

/// Create a testimonial.
///
/// POST /admin/api/testimonials
#[instrument(skip(state, payload))]
pub async fn create_testimonial(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<TestimonialPayload>,
) -> Result<impl IntoResponse, AppError> {
    let input = payload.into_input()?;
    let testimonial = ContentRepository::new(state.pool())
        .create_testimonial(&input)
        .await?;

    Ok((StatusCode::CREATED, Json(testimonial)))
}

/// Replace a testimonial.
///
/// PUT /admin/api/testimonials/{id}
#[instrument(skip(state, payload))]
pub async fn update_testimonial(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<TestimonialPayload>,
) -> Result<impl IntoResponse, AppError> {
    let input = payload.into_input()?;
    let testimonial = ContentRepository::new(state.pool())
        .update_testimonial(TestimonialId::new(id), &input)
        .await?;

    Ok(Json(testimonial))
}

/// Delete a testimonial.
///
/// DELETE /admin/api/testimonials/{id}
#[instrument(skip(state))]
pub async fn delete_testimonial(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ContentRepository::new(state.pool())
        .delete_testimonial(TestimonialId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
