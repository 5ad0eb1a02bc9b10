//! Authentication route handlers.

use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::middleware::{set_current_user, terminate_session};
use crate::models::CurrentUser;
use crate::services::AuthService;
use crate::state::AppState;

/// Login request payload.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login success response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub email: String,
}

/// Login with email and password.
///
/// POST /auth/login
#[instrument(skip(state, session, request), fields(email = %request.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let account = AuthService::new(state.pool())
        .login_with_password(&request.email, &request.password)
        .await?;

    let user = CurrentUser {
        id: account.id,
        email: account.email.clone(),
    };

    set_current_user(&session, &user)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store session: {e}")))?;

    set_sentry_user(account.id.as_i32(), Some(account.email.as_str()));

    tracing::info!(account_id = account.id.as_i32(), "login successful");

    Ok(Json(LoginResponse {
        success: true,
        email: account.email.into_inner(),
    }))
}

/// Logout and destroy the session.
///
/// POST /auth/logout
#[instrument(skip(session))]
pub async fn logout(session: Session) -> impl IntoResponse {
    terminate_session(&session).await;
    clear_sentry_user();

    Json(serde_json::json!({ "success": true }))
}
