//! Role-based access control extractors.
//!
//! Each extractor wraps [`AdminContext`] and rejects requests whose role does
//! not carry the needed right. Use these in route handlers to enforce
//! authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use folio_core::error::CoreError;

use super::auth::AdminContext;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a role that may create projects. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn add_project(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AdminContext);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let admin = AdminContext::from_request_parts(parts, state).await?;
        if !admin.can_create {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin access required".into(),
            )));
        }
        Ok(RequireAdmin(admin))
    }
}

/// Requires a role that may edit projects. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn remove_project(RequireEditor(admin): RequireEditor) -> AppResult<StatusCode> {
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
pub struct RequireEditor(pub AdminContext);

impl FromRequestParts<AppState> for RequireEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let admin = AdminContext::from_request_parts(parts, state).await?;
        if !admin.can_edit {
            return Err(AppError::Core(CoreError::Forbidden(
                "Edit access required".into(),
            )));
        }
        Ok(RequireEditor(admin))
    }
}
