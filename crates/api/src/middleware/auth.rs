//! JWT-based admin authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use folio_core::error::CoreError;
use folio_core::roles;
use serde::Serialize;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authorization context of an admin request.
///
/// Produced from the `Authorization: Bearer <token>` header and passed to
/// handlers explicitly; nothing about the caller is kept on the server.
///
/// ```ignore
/// async fn my_handler(admin: AdminContext) -> AppResult<Json<()>> {
///     tracing::info!(role = %admin.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct AdminContext {
    /// The granted role name (`"admin"` or `"editor"`).
    pub role: String,
    /// Whether this caller may create projects.
    pub can_create: bool,
    /// Whether this caller may edit, delete, and set cover images.
    pub can_edit: bool,
}

impl AdminContext {
    pub fn for_role(role: &str) -> Self {
        Self {
            role: role.to_string(),
            can_create: roles::can_create(role),
            can_edit: roles::can_edit(role),
        }
    }
}

impl FromRequestParts<AppState> for AdminContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AdminContext::for_role(&claims.role))
    }
}
