//! Handlers for the `/auth` resource (login, logout, me).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminContext;
use crate::state::AppState;

/// Message returned for any rejected password.
const INCORRECT_PASSWORD: &str = "Incorrect password";

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub admin: AdminContext,
}

/// POST /api/v1/auth/login
///
/// Exchange the shared admin password for an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let role = state
        .config
        .passwords
        .role_for(&input.password, state.config.jwt.secret.as_bytes())
        .ok_or_else(|| {
            tracing::warn!("Rejected admin login");
            AppError::Core(CoreError::Unauthorized(INCORRECT_PASSWORD.into()))
        })?;

    let access_token = generate_access_token(role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(role, "Admin logged in");

    Ok(Json(LoginResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        admin: AdminContext::for_role(role),
    }))
}

/// POST /api/v1/auth/logout
///
/// Tokens are not tracked server-side; the client discards its token.
pub async fn logout(admin: AdminContext) -> StatusCode {
    tracing::info!(role = %admin.role, "Admin logged out");
    StatusCode::NO_CONTENT
}

/// GET /api/v1/auth/me
pub async fn me(admin: AdminContext) -> Json<AdminContext> {
    Json(admin)
}
