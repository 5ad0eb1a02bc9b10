//! Admin site settings management.

use std::collections::BTreeMap;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::instrument;

use crate::db::SettingsRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// List all settings.
///
/// GET /admin/api/settings
#[instrument(skip(state))]
pub async fn list(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let settings = SettingsRepository::new(state.pool()).get_all().await?;
    Ok(Json(settings))
}

/// Upsert a batch of settings.
///
/// PUT /admin/api/settings
#[instrument(skip(state, payload))]
pub async fn update(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Json(payload): Json<BTreeMap<String, Option<String>>>,
) -> Result<impl IntoResponse, AppError> {
    if payload.keys().any(|key| key.trim().is_empty()) {
        return Err(AppError::BadRequest("setting key cannot be empty".to_owned()));
    }

    let repo = SettingsRepository::new(state.pool());
    repo.upsert_many(&payload).await?;

    let settings = repo.get_all().await?;
    Ok(Json(settings))
}

/// Delete a setting.
///
/// DELETE /admin/api/settings/{key}
#[instrument(skip(state))]
pub async fn delete(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    SettingsRepository::new(state.pool()).delete(&key).await?;

    Ok(StatusCode::NO_CONTENT)
}
