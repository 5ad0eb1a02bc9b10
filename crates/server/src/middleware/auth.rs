//! Authorization gate for admin routes.
//!
//! Provides the [`RequireAdmin`] extractor. The gate never trusts the session
//! alone: every request re-checks the admin role against the database, so a
//! revoked account is locked out on its next request rather than at session
//! expiry. Any failure along the way (missing session, missing role, lookup
//! error, lookup timeout) denies access.

use std::time::Duration;

use axum::{
    Json,
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use tower_sessions::Session;

use registra_core::Role;

use crate::db::roles::RoleRepository;
use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;

/// Upper bound on the per-request role lookup. A slow or wedged database
/// must deny access, not grant it.
const ROLE_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Extractor that requires an authenticated account holding the admin role.
///
/// On denial the session is terminated: HTML requests get a redirect to the
/// login page, API requests get 401 with a JSON body.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(user): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAdmin(pub CurrentUser);

/// Error returned when admin authorization fails.
pub enum AdminGateRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for API requests).
    Unauthorized,
}

impl AdminGateRejection {
    fn for_path(path: &str) -> Self {
        if path.starts_with("/admin/api/") || path.starts_with("/api/") {
            Self::Unauthorized
        } else {
            Self::RedirectToLogin
        }
    }
}

impl IntoResponse for AdminGateRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "admin access required" })),
            )
                .into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AdminGateRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let rejection = || AdminGateRejection::for_path(parts.uri.path());

        // Set by SessionManagerLayer; absent means the layer isn't mounted,
        // which must read as "not signed in".
        let session = parts.extensions.get::<Session>().ok_or_else(rejection)?;

        let user: CurrentUser = session
            .get(session_keys::CURRENT_USER)
            .await
            .ok()
            .flatten()
            .ok_or_else(rejection)?;

        let app_state = AppState::from_ref(state);
        let roles = RoleRepository::new(app_state.pool());

        let is_admin = match tokio::time::timeout(
            ROLE_CHECK_TIMEOUT,
            roles.has_role(user.id, Role::Admin),
        )
        .await
        {
            Ok(Ok(is_admin)) => is_admin,
            Ok(Err(e)) => {
                tracing::error!(error = %e, "admin role lookup failed, denying access");
                false
            }
            Err(_) => {
                tracing::error!("admin role lookup timed out, denying access");
                false
            }
        };

        if !is_admin {
            terminate_session(session).await;
            return Err(rejection());
        }

        Ok(Self(user))
    }
}

/// Helper to set the current user in the session.
///
/// Cycles the session ID to prevent fixation across the login boundary.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Destroy the session entirely, removing the server-side record.
///
/// Deletion failures are logged and swallowed: the caller is already on a
/// deny/logout path and the cookie is invalidated regardless.
pub async fn terminate_session(session: &Session) {
    if let Err(e) = session.flush().await {
        tracing::warn!(error = %e, "failed to flush session");
    }
}
