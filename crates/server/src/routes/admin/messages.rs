//! Admin contact submission inbox.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::instrument;

use registra_core::ContactMessageId;

use crate::db::ContactMessageRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// List all contact submissions, newest first.
///
/// GET /admin/api/messages
#[instrument(skip(state))]
pub async fn list(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let messages = ContactMessageRepository::new(state.pool()).list_all().await?;
    Ok(Json(messages))
}

/// Mark a submission as read.
///
/// POST /admin/api/messages/{id}/read
#[instrument(skip(state))]
pub async fn mark_read(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ContactMessageRepository::new(state.pool())
        .mark_read(ContactMessageId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Delete a submission.
///
/// DELETE /admin/api/messages/{id}
#[instrument(skip(state))]
pub async fn delete(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    ContactMessageRepository::new(state.pool())
        .delete(ContactMessageId::new(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
