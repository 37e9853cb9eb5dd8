pub mod admin;
pub mod auth;
pub mod health;
pub mod project;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/logout                                     logout (token required)
/// /auth/me                                         current admin context
///
/// /projects                                        list (public)
/// /projects/{id}                                   detail with media (public)
///
/// /admin/projects                                  create (multipart)
/// /admin/projects/{id}                             update, delete
/// /admin/projects/{id}/media                       append media (multipart)
/// /admin/projects/{id}/cover                       set cover image
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/projects", project::router())
        .nest("/admin/projects", admin::router())
}
