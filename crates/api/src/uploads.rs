//! Multipart project forms and the on-disk upload root.
//!
//! [`read_project_form`] drains a multipart body into memory, keeping text
//! fields and file parts apart. Nothing touches the disk until the handler
//! has validated the form and asks [`UploadStore::save_all`] to write the
//! files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use axum::extract::Multipart;
use folio_core::manifest::{Manifest, UploadedFile};
use folio_core::uploads::{generate_storage_filename, stored_name_for_path};
use folio_core::validation::{validate_project_fields, ProjectFields};

use crate::config::UploadConfig;
use crate::error::{AppError, AppResult};

/// Form field names.
pub mod fields {
    pub const PROJECT_NAME: &str = "project_name";
    pub const PROJECT_SHORT_DESCRIPTION: &str = "project_short_description";
    pub const PROJECT_TYPE: &str = "project_type";
    pub const MEDIA_TYPE: &str = "media_type";
    pub const MEDIA_DESC: &str = "media_desc";
    pub const MEDIA_YOUTUBE: &str = "media_youtube";
}

/// Content type assumed for file parts that declare none.
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

// ---------------------------------------------------------------------------
// Form parsing
// ---------------------------------------------------------------------------

/// A file part held in memory until the form is accepted.
#[derive(Debug, Clone)]
pub struct PendingFile {
    pub original_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// Everything a project multipart form carried.
#[derive(Debug, Default)]
pub struct ProjectForm {
    /// Single-valued text fields (last value wins).
    pub text: HashMap<String, String>,
    pub media_types: Vec<String>,
    pub media_descs: Vec<String>,
    pub media_youtube: Vec<String>,
    /// File parts in arrival order.
    pub files: Vec<PendingFile>,
}

impl ProjectForm {
    fn field(&self, name: &str) -> Option<&str> {
        self.text.get(name).map(String::as_str)
    }

    /// Validate the project core fields, echoing entered values on failure.
    pub fn project_fields(&self) -> AppResult<ProjectFields> {
        validate_project_fields(
            self.field(fields::PROJECT_NAME),
            self.field(fields::PROJECT_SHORT_DESCRIPTION),
            self.field(fields::PROJECT_TYPE),
        )
        .map_err(|e| AppError::with_form_values(e, self.entered_values()))
    }

    /// The values the client typed, for redisplaying a rejected form.
    pub fn entered_values(&self) -> serde_json::Value {
        let values: serde_json::Map<String, serde_json::Value> = [
            fields::PROJECT_NAME,
            fields::PROJECT_SHORT_DESCRIPTION,
            fields::PROJECT_TYPE,
        ]
        .into_iter()
        .map(|name| {
            let value = self.field(name).unwrap_or_default().to_string();
            (name.to_string(), serde_json::Value::String(value))
        })
        .collect();
        serde_json::Value::Object(values)
    }

    /// The declared media slots as one typed sequence.
    pub fn manifest(&self) -> Manifest {
        Manifest::from_parallel(&self.media_types, &self.media_descs, &self.media_youtube)
    }
}

/// Strip the `[]` suffix some form encoders append to repeated fields.
fn base_field_name(name: &str) -> &str {
    name.strip_suffix("[]").unwrap_or(name)
}

/// Read a whole multipart body into a [`ProjectForm`].
///
/// Any part with a filename is a file; file inputs left empty by the browser
/// (blank filename, no bytes) are dropped. Unknown text fields are kept in
/// `text` and otherwise ignored.
pub async fn read_project_form(mut multipart: Multipart) -> AppResult<ProjectForm> {
    let mut form = ProjectForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = base_field_name(field.name().unwrap_or("")).to_string();

        if let Some(file_name) = field.file_name().map(str::to_string) {
            let content_type = field
                .content_type()
                .unwrap_or(DEFAULT_CONTENT_TYPE)
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            if file_name.is_empty() && data.is_empty() {
                continue;
            }
            form.files.push(PendingFile {
                original_name: file_name,
                content_type,
                data,
            });
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        match name.as_str() {
            fields::MEDIA_TYPE => form.media_types.push(text),
            fields::MEDIA_DESC => form.media_descs.push(text),
            fields::MEDIA_YOUTUBE => form.media_youtube.push(text),
            _ => {
                form.text.insert(name, text);
            }
        }
    }

    Ok(form)
}

// ---------------------------------------------------------------------------
// Upload root
// ---------------------------------------------------------------------------

/// Writes uploaded files under the upload root and removes them again.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    public_prefix: String,
}

impl UploadStore {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            public_prefix: config.public_prefix.clone(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn public_prefix(&self) -> &str {
        &self.public_prefix
    }

    /// Create the upload root if it does not exist yet.
    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Write every pending file under a fresh generated name.
    ///
    /// Files are written one after another in arrival order and the result
    /// keeps that order. If any write fails, files already written by this
    /// call are removed before the error is returned.
    pub async fn save_all(&self, files: Vec<PendingFile>) -> AppResult<Vec<UploadedFile>> {
        self.ensure_dir()
            .await
            .map_err(|e| AppError::InternalError(format!("Cannot create upload dir: {e}")))?;

        let mut saved = Vec::with_capacity(files.len());
        for file in files {
            let stored_name = generate_storage_filename(&file.original_name);
            let path = self.dir.join(&stored_name);

            if let Err(e) = tokio::fs::write(&path, &file.data).await {
                self.remove_files(&saved).await;
                return Err(AppError::InternalError(format!(
                    "Failed to store upload '{}': {e}",
                    file.original_name
                )));
            }

            tracing::debug!(
                stored_name = %stored_name,
                content_type = %file.content_type,
                bytes = file.data.len(),
                "Stored upload",
            );
            saved.push(UploadedFile {
                stored_name,
                content_type: file.content_type,
            });
        }
        Ok(saved)
    }

    /// Remove uploads that no media record ended up using.
    ///
    /// File slots consume uploads strictly in arrival order, so the unused
    /// ones are the tail past the first `used` files.
    pub async fn remove_unused(&self, files: &[UploadedFile], used: usize) {
        if let Some(unused) = files.get(used..) {
            self.remove_files(unused).await;
        }
    }

    /// Best-effort removal of files written during this request.
    pub async fn remove_files(&self, files: &[UploadedFile]) {
        for file in files {
            self.remove_stored(&file.stored_name).await;
        }
    }

    /// Best-effort removal of the stored files behind media paths.
    ///
    /// Paths that do not point into the upload root, such as YouTube links,
    /// are skipped.
    pub async fn remove_paths(&self, paths: &[String]) {
        for path in paths {
            if let Some(name) = stored_name_for_path(&self.public_prefix, path) {
                self.remove_stored(name).await;
            }
        }
    }

    async fn remove_stored(&self, stored_name: &str) {
        let path = self.dir.join(stored_name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::debug!(path = %path.display(), "Removed upload"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove upload")
            }
        }
    }
}
