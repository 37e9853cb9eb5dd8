//! Liveness report for the database and the upload root.

use std::path::Path;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `ok` when every dependency is usable, `degraded` otherwise.
    pub status: &'static str,
    pub db_healthy: bool,
    /// The upload root exists, is a directory, and is not read-only.
    pub uploads_writable: bool,
}

/// GET /health
async fn report(State(state): State<AppState>) -> Json<HealthReport> {
    let db_healthy = folio_db::health_check(&state.pool).await.is_ok();
    let uploads_writable = upload_root_writable(state.uploads.dir()).await;

    if !uploads_writable {
        tracing::warn!(dir = %state.uploads.dir().display(), "Upload root is not writable");
    }

    Json(HealthReport {
        status: if db_healthy && uploads_writable {
            "ok"
        } else {
            "degraded"
        },
        db_healthy,
        uploads_writable,
    })
}

async fn upload_root_writable(dir: &Path) -> bool {
    match tokio::fs::metadata(dir).await {
        Ok(meta) => meta.is_dir() && !meta.permissions().readonly(),
        Err(_) => false,
    }
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(report))
}
