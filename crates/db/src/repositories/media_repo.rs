//! Repository for the `project_media` table.

use folio_core::manifest::{reconcile_from, CaptionEdit, Manifest, MediaDraft, UploadedFile};
use folio_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::media::MediaItem;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, media_kind, media_path, caption, sort_order, created_at";

/// Provides operations on project media.
pub struct MediaRepo;

impl MediaRepo {
    /// List a project's media in display order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<MediaItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_media
             WHERE project_id = $1
             ORDER BY sort_order, created_at, id"
        );
        sqlx::query_as::<_, MediaItem>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Reconcile a manifest against its uploads and append the result to an
    /// existing project, all in one transaction.
    ///
    /// The project row is locked before the next sort order is read, so
    /// concurrent appends to the same project number their rows one after
    /// the other. Returns `None` (and writes nothing) if the project does
    /// not exist.
    pub async fn append(
        pool: &PgPool,
        project_id: DbId,
        manifest: &Manifest,
        files: &[UploadedFile],
        public_prefix: &str,
    ) -> Result<Option<Vec<MediaItem>>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let exists: Option<(DbId,)> =
            sqlx::query_as("SELECT id FROM projects WHERE id = $1 FOR UPDATE")
                .bind(project_id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(None);
        }

        let first_order = Self::next_sort_order(&mut *tx, project_id).await?;
        let drafts = reconcile_from(manifest, files, public_prefix, first_order);
        let items = Self::insert_drafts(&mut *tx, project_id, &drafts).await?;

        tx.commit().await?;
        tracing::debug!(project_id, first_order, media = items.len(), "Appended media");
        Ok(Some(items))
    }

    async fn next_sort_order(
        conn: &mut PgConnection,
        project_id: DbId,
    ) -> Result<i32, sqlx::Error> {
        let row: (i32,) = sqlx::query_as(
            "SELECT COALESCE(MAX(sort_order), 0) + 1 FROM project_media WHERE project_id = $1",
        )
        .bind(project_id)
        .fetch_one(conn)
        .await?;
        Ok(row.0)
    }

    /// Insert drafts on an open connection, in draft order.
    pub(crate) async fn insert_drafts(
        conn: &mut PgConnection,
        project_id: DbId,
        drafts: &[MediaDraft],
    ) -> Result<Vec<MediaItem>, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_media (project_id, media_kind, media_path, caption, sort_order)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );

        let mut items = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let item = sqlx::query_as::<_, MediaItem>(&query)
                .bind(project_id)
                .bind(draft.kind.as_str())
                .bind(&draft.path)
                .bind(&draft.caption)
                .bind(draft.sort_order)
                .fetch_one(&mut *conn)
                .await?;
            items.push(item);
        }
        Ok(items)
    }

    /// Apply caption edits on an open connection. Edits naming a media id
    /// that does not belong to `project_id` are ignored. Returns the number
    /// of rows changed.
    pub(crate) async fn apply_caption_edits(
        conn: &mut PgConnection,
        project_id: DbId,
        edits: &[CaptionEdit],
    ) -> Result<u64, sqlx::Error> {
        let mut changed = 0;
        for edit in edits {
            let result = sqlx::query(
                "UPDATE project_media SET caption = $3 WHERE id = $1 AND project_id = $2",
            )
            .bind(edit.media_id)
            .bind(project_id)
            .bind(&edit.caption)
            .execute(&mut *conn)
            .await?;
            changed += result.rows_affected();
        }
        Ok(changed)
    }
}
