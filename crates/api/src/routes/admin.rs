//! Route definitions for `/admin/projects`.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::admin_project;
use crate::state::AppState;

/// Routes mounted at `/admin/projects`.
///
/// ```text
/// POST   /                                  -> create (multipart, admin)
/// PUT    /{id}                              -> update (editor)
/// DELETE /{id}                              -> delete (editor)
/// POST   /{id}/media                        -> append_media (multipart, editor)
/// PUT    /{id}/cover                        -> set_cover (editor)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(admin_project::create))
        .route(
            "/{id}",
            put(admin_project::update).delete(admin_project::delete),
        )
        .route("/{id}/media", post(admin_project::append_media))
        .route("/{id}/cover", put(admin_project::set_cover))
}
