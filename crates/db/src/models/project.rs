//! Project entity model and DTOs.

use folio_core::types::{DbId, Timestamp};
use folio_core::validation::ProjectFields;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::media::MediaItem;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub short_description: String,
    pub project_type: String,
    /// Path copied from one of the project's media rows. May be stale.
    pub cover_image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for inserting a project. Fields are already validated.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub short_description: String,
    pub project_type: String,
}

impl From<ProjectFields> for CreateProject {
    fn from(fields: ProjectFields) -> Self {
        Self {
            name: fields.name,
            short_description: fields.short_description,
            project_type: fields.project_type,
        }
    }
}

/// Input for editing a project's core fields. Cover image is set separately.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub name: String,
    pub short_description: String,
    pub project_type: String,
}

impl From<ProjectFields> for UpdateProject {
    fn from(fields: ProjectFields) -> Self {
        Self {
            name: fields.name,
            short_description: fields.short_description,
            project_type: fields.project_type,
        }
    }
}

/// A project together with its media in display order.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithMedia {
    #[serde(flatten)]
    pub project: Project,
    pub media: Vec<MediaItem>,
}
