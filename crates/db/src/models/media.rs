//! Project media entity model.

use folio_core::media::KIND_YOUTUBE;
use folio_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A media row from the `project_media` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaItem {
    pub id: DbId,
    pub project_id: DbId,
    /// One of `image`, `video`, `youtube`.
    pub media_kind: String,
    /// Public upload path for files, the raw URL for YouTube links.
    pub media_path: String,
    pub caption: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

impl MediaItem {
    /// Whether this row points at a file in the upload root.
    pub fn is_upload(&self) -> bool {
        self.media_kind != KIND_YOUTUBE
    }
}
