//! First-run setup route.
//!
//! Exposes the one-time admin bootstrap endpoint. The endpoint is safe to
//! leave mounted permanently: once an admin exists it always answers 400.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::AppError;
use crate::services::SetupService;
use crate::state::AppState;

/// Setup request payload.
#[derive(Debug, Deserialize)]
pub struct SetupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Setup success response.
#[derive(Debug, Serialize)]
pub struct SetupResponse {
    pub success: bool,
    pub message: String,
    pub email: String,
}

/// Create the first admin account.
///
/// POST /api/setup-admin
#[instrument(skip(state, request))]
pub async fn setup_admin(
    State(state): State<AppState>,
    Json(request): Json<SetupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let account = SetupService::new(state.pool())
        .bootstrap_admin(&request.email, &request.password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(SetupResponse {
            success: true,
            message: "Admin account created successfully".to_owned(),
            email: account.email.into_inner(),
        }),
    ))
}
