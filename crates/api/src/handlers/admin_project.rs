//! Admin handlers for creating, editing, and deleting projects.
//!
//! Create and append accept multipart forms carrying a media manifest plus
//! the uploaded files; both run the manifest through the reconciler before
//! anything is persisted.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::manifest::{reconcile, CaptionEdit};
use folio_core::types::DbId;
use folio_core::validation::validate_project_fields;
use folio_db::models::media::MediaItem;
use folio_db::models::project::{Project, ProjectWithMedia};
use folio_db::repositories::{MediaRepo, ProjectRepo};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireEditor};
use crate::state::AppState;
use crate::uploads::read_project_form;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PUT /admin/projects/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateProjectRequest {
    pub project_name: Option<String>,
    pub project_short_description: Option<String>,
    pub project_type: Option<String>,
    /// Caption changes for the project's media. Unknown ids are ignored.
    #[serde(default)]
    pub captions: Vec<CaptionEdit>,
}

/// Request body for `PUT /admin/projects/{id}/cover`.
#[derive(Debug, Deserialize)]
pub struct SetCoverRequest {
    pub media_id: DbId,
}

fn project_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Project",
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/projects
///
/// Create a project from a multipart form. Missing core fields reject the
/// form before any file is written. The project and all reconciled media are
/// stored in one transaction; if that fails, the files written for this
/// request are removed again.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ProjectWithMedia>)> {
    let mut form = read_project_form(multipart).await?;
    let project_fields = form.project_fields()?;
    let manifest = form.manifest();

    let uploads = &state.uploads;
    let saved = uploads.save_all(std::mem::take(&mut form.files)).await?;
    let drafts = reconcile(&manifest, &saved, uploads.public_prefix());
    let used = drafts.iter().filter(|d| d.kind.is_upload()).count();
    uploads.remove_unused(&saved, used).await;

    let created =
        match ProjectRepo::create_with_media(&state.pool, &project_fields.into(), &drafts).await {
            Ok(created) => created,
            Err(e) => {
                uploads.remove_files(&saved).await;
                return Err(e.into());
            }
        };

    tracing::info!(
        project_id = created.project.id,
        role = %admin.role,
        slots = manifest.slots.len(),
        files = saved.len(),
        media = created.media.len(),
        "Project created",
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// POST /api/v1/admin/projects/{id}/media
///
/// Append media to an existing project. New rows are numbered after the
/// project's current last sort order.
pub async fn append_media(
    State(state): State<AppState>,
    RequireEditor(admin): RequireEditor,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Vec<MediaItem>>)> {
    if ProjectRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(project_not_found(id));
    }

    let mut form = read_project_form(multipart).await?;
    let manifest = form.manifest();

    let uploads = &state.uploads;
    let saved = uploads.save_all(std::mem::take(&mut form.files)).await?;

    let added =
        match MediaRepo::append(&state.pool, id, &manifest, &saved, uploads.public_prefix()).await
        {
            Ok(Some(added)) => added,
            Ok(None) => {
                uploads.remove_files(&saved).await;
                return Err(project_not_found(id));
            }
            Err(e) => {
                uploads.remove_files(&saved).await;
                return Err(e.into());
            }
        };

    let used = added.iter().filter(|m| m.is_upload()).count();
    uploads.remove_unused(&saved, used).await;

    tracing::info!(
        project_id = id,
        role = %admin.role,
        slots = manifest.slots.len(),
        media = added.len(),
        "Media appended",
    );

    Ok((StatusCode::CREATED, Json(added)))
}

/// PUT /api/v1/admin/projects/{id}
///
/// Replace name, description, and type, and apply caption edits.
pub async fn update(
    State(state): State<AppState>,
    RequireEditor(_admin): RequireEditor,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProjectRequest>,
) -> AppResult<Json<Project>> {
    let project_fields = validate_project_fields(
        input.project_name.as_deref(),
        input.project_short_description.as_deref(),
        input.project_type.as_deref(),
    )
    .map_err(|e| {
        AppError::with_form_values(
            e,
            json!({
                "project_name": input.project_name.as_deref().unwrap_or_default(),
                "project_short_description":
                    input.project_short_description.as_deref().unwrap_or_default(),
                "project_type": input.project_type.as_deref().unwrap_or_default(),
            }),
        )
    })?;

    let project = ProjectRepo::update_with_captions(
        &state.pool,
        id,
        &project_fields.into(),
        &input.captions,
    )
    .await?
    .ok_or_else(|| project_not_found(id))?;

    tracing::info!(project_id = id, captions = input.captions.len(), "Project updated");
    Ok(Json(project))
}

/// PUT /api/v1/admin/projects/{id}/cover
///
/// Copy one of the project's media paths into its cover image. Media that
/// belongs to another project is reported as not found.
pub async fn set_cover(
    State(state): State<AppState>,
    RequireEditor(_admin): RequireEditor,
    Path(id): Path<DbId>,
    Json(input): Json<SetCoverRequest>,
) -> AppResult<Json<Project>> {
    if ProjectRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(project_not_found(id));
    }

    let project = ProjectRepo::set_cover_image(&state.pool, id, input.media_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "MediaItem",
            id: input.media_id,
        }))?;

    tracing::info!(project_id = id, media_id = input.media_id, "Cover image set");
    Ok(Json(project))
}

/// DELETE /api/v1/admin/projects/{id}
///
/// Media rows go with the project; their stored files are removed
/// best-effort afterwards.
pub async fn delete(
    State(state): State<AppState>,
    RequireEditor(admin): RequireEditor,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let paths = ProjectRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| project_not_found(id))?;

    state.uploads.remove_paths(&paths).await;

    tracing::info!(project_id = id, role = %admin.role, media = paths.len(), "Project deleted");
    Ok(StatusCode::NO_CONTENT)
}
