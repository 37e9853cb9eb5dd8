//! Repository for the `projects` table.

use folio_core::manifest::{CaptionEdit, MediaDraft};
use folio_core::media::{KIND_IMAGE, KIND_VIDEO};
use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::project::{CreateProject, Project, ProjectWithMedia, UpdateProject};
use crate::repositories::MediaRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, short_description, project_type, cover_image, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a project and all of its reconciled media in one transaction.
    ///
    /// Either the project and every media row are stored, or nothing is.
    pub async fn create_with_media(
        pool: &PgPool,
        input: &CreateProject,
        drafts: &[MediaDraft],
    ) -> Result<ProjectWithMedia, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects (name, short_description, project_type)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.short_description)
            .bind(&input.project_type)
            .fetch_one(&mut *tx)
            .await?;

        let media = MediaRepo::insert_drafts(&mut *tx, project.id, drafts).await?;

        tx.commit().await?;
        Ok(ProjectWithMedia { project, media })
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a project with its media in display order.
    pub async fn find_with_media(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProjectWithMedia>, sqlx::Error> {
        let Some(project) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let media = MediaRepo::list_by_project(pool, id).await?;
        Ok(Some(ProjectWithMedia { project, media }))
    }

    /// List all projects ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Update core fields and media captions in one transaction.
    ///
    /// Caption edits for media outside this project are ignored. Returns
    /// `None` (and changes nothing) if the project does not exist.
    pub async fn update_with_captions(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
        captions: &[CaptionEdit],
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE projects SET
                name = $2,
                short_description = $3,
                project_type = $4,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let Some(project) = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.short_description)
            .bind(&input.project_type)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let changed = MediaRepo::apply_caption_edits(&mut *tx, id, captions).await?;
        tracing::debug!(project_id = id, requested = captions.len(), changed, "Applied caption edits");

        tx.commit().await?;
        Ok(Some(project))
    }

    /// Copy the path of one of the project's media rows into `cover_image`.
    ///
    /// Returns `None` and leaves the project untouched when the media id does
    /// not belong to this project (or the project does not exist).
    pub async fn set_cover_image(
        pool: &PgPool,
        id: DbId,
        media_id: DbId,
    ) -> Result<Option<Project>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let path: Option<(String,)> = sqlx::query_as(
            "SELECT media_path FROM project_media WHERE id = $1 AND project_id = $2",
        )
        .bind(media_id)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((path,)) = path else {
            return Ok(None);
        };

        let query = format!(
            "UPDATE projects SET cover_image = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&path)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(project)
    }

    /// Delete a project. Its media rows go with it via `ON DELETE CASCADE`.
    ///
    /// Returns the paths of the project's uploaded files so the caller can
    /// remove them from the upload root, or `None` if no project with this id
    /// existed. YouTube rows are left out: their path is a client-supplied
    /// link, not a file this project owns.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Vec<String>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let paths: Vec<(String,)> = sqlx::query_as(
            "SELECT media_path FROM project_media
             WHERE project_id = $1 AND media_kind IN ($2, $3)
             ORDER BY sort_order, id",
        )
        .bind(id)
        .bind(KIND_IMAGE)
        .bind(KIND_VIDEO)
        .fetch_all(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(paths.into_iter().map(|(p,)| p).collect()))
    }
}
