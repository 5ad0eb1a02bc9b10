//! Admin article management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use registra_core::{ArticleId, Slug};

use crate::db::articles::{ArticleInput, ArticleRepository};
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Article create/update payload.
#[derive(Debug, Deserialize)]
pub struct ArticlePayload {
    /// Explicit slug; derived from the title when omitted.
    #[serde(default)]
    pub slug: Option<String>,
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

impl ArticlePayload {
    fn into_input(self) -> Result<ArticleInput, AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::BadRequest("title is required".to_owned()));
        }

        let slug = match &self.slug {
            Some(s) => Slug::parse(s),
            None => Slug::from_title(&self.title),
        }
        .map_err(|e| AppError::BadRequest(format!("invalid slug: {e}")))?;

        Ok(ArticleInput {
            slug,
            title: self.title.trim().to_owned(),
            excerpt: self.excerpt,
            content: self.content,
            author_name: self.author_name,
            image_url: self.image_url,
            is_published: self.is_published,
        })
    }
}

/// List all articles including drafts.
///
/// GET /admin/api/articles
#[instrument(skip(state))]
pub async fn list(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let articles = ArticleRepository::new(state.pool()).list_all().await?;
    Ok(Json(articles))
}

/// Create an article.
///
/// POST /admin/api/articles
#[instrument(skip(state, payload))]
pub async fn create(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<ArticlePayload>,
) -> Result<impl IntoResponse, AppError> {
    let input = payload.into_input()?;
    let article = ArticleRepository::new(state.pool()).create(&input).await?;

    Ok((StatusCode::CREATED, Json(article)))
}

/// Replace an article.
///
/// PUT /admin/api/articles/{id}
#[instrument(skip(state, payload))]
pub async fn update(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ArticlePayload>,
) -> Result<impl IntoResponse, AppError> {
    let input = payload.into_input()?;
    let article = ArticleRepository::new(state.pool())
        .update(ArticleId::new(id), &input)
        .await?;

    Ok(Json(article))
}

/// Delete an article.
///
/// DELETE /admin/api/articles/{id}
#[instrument(skip(state))]
pub async fn delete(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ArticleRepository::new(state.pool())
        .delete(ArticleId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
