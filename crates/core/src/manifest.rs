//! Media manifest reconciliation.
//!
//! A project form declares a list of media slots (upload a file here, link a
//! YouTube video there) while the transport delivers the uploaded bytes as a
//! separate list with no per-slot correlation. [`reconcile`] re-aligns the two
//! using arrival order: each `file` slot consumes the next uploaded file.
//!
//! The output is an ordered list of [`MediaDraft`] records ready to insert.
//! Slots that yield no usable content are dropped without error.

use serde::{Deserialize, Serialize};

use crate::media::MediaKind;
use crate::types::DbId;
use crate::uploads::public_media_path;

/// Slot tag for an uploaded file.
pub const SLOT_FILE: &str = "file";

/// Slot tag for a YouTube link.
pub const SLOT_YOUTUBE: &str = "youtube";

/// First sort order assigned to the media of a new project.
pub const FIRST_SORT_ORDER: i32 = 1;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// What a slot asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotKind {
    File,
    Youtube,
    /// Any tag the form should not have sent. Reconciliation skips it.
    Unknown(String),
}

impl SlotKind {
    pub fn parse(tag: &str) -> Self {
        match tag {
            SLOT_FILE => Self::File,
            SLOT_YOUTUBE => Self::Youtube,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// One declared media entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSlot {
    pub kind: SlotKind,
    pub caption: String,
    pub youtube_link: Option<String>,
}

/// The media slots declared by a submitted form, in slot order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub slots: Vec<ManifestSlot>,
}

impl Manifest {
    /// Build a manifest from the parallel form arrays.
    ///
    /// `kinds` decides the slot count. A caption or link missing at index
    /// `i` becomes an empty caption or no link for slot `i`.
    pub fn from_parallel(
        kinds: &[String],
        captions: &[String],
        youtube_links: &[String],
    ) -> Self {
        let slots = kinds
            .iter()
            .enumerate()
            .map(|(i, tag)| ManifestSlot {
                kind: SlotKind::parse(tag),
                caption: captions.get(i).cloned().unwrap_or_default(),
                youtube_link: youtube_links.get(i).cloned(),
            })
            .collect();
        Self { slots }
    }
}

/// A file that was written to the upload root during the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Generated name under the upload root.
    pub stored_name: String,
    /// Content type declared by the client for this part.
    pub content_type: String,
}

/// A media row ready to be persisted for some project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaDraft {
    pub kind: MediaKind,
    pub path: String,
    pub caption: String,
    pub sort_order: i32,
}

/// A caption change requested through the edit form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CaptionEdit {
    pub media_id: DbId,
    #[serde(default)]
    pub caption: String,
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// Reconcile a manifest against the files uploaded with it.
///
/// Sort orders start at [`FIRST_SORT_ORDER`].
pub fn reconcile(manifest: &Manifest, files: &[UploadedFile], public_prefix: &str) -> Vec<MediaDraft> {
    reconcile_from(manifest, files, public_prefix, FIRST_SORT_ORDER)
}

/// Reconcile a manifest, numbering emitted records from `first_order`.
///
/// Emitted sort orders are strictly increasing with no gaps. The file
/// cursor only moves when a `file` slot actually consumes an upload, so a
/// skipped YouTube slot never shifts which file a later caption lands on.
pub fn reconcile_from(
    manifest: &Manifest,
    files: &[UploadedFile],
    public_prefix: &str,
    first_order: i32,
) -> Vec<MediaDraft> {
    let mut drafts = Vec::with_capacity(manifest.slots.len());
    let mut pending = files.iter();
    let mut sort_order = first_order;

    for slot in &manifest.slots {
        let draft = match &slot.kind {
            SlotKind::File => {
                let Some(file) = pending.next() else {
                    continue;
                };
                MediaDraft {
                    kind: MediaKind::for_upload(&file.content_type),
                    path: public_media_path(public_prefix, &file.stored_name),
                    caption: slot.caption.clone(),
                    sort_order,
                }
            }
            SlotKind::Youtube => {
                let link = slot.youtube_link.as_deref().map(str::trim).unwrap_or("");
                if link.is_empty() {
                    continue;
                }
                MediaDraft {
                    kind: MediaKind::Youtube,
                    path: link.to_string(),
                    caption: slot.caption.clone(),
                    sort_order,
                }
            }
            SlotKind::Unknown(_) => continue,
        };

        drafts.push(draft);
        sort_order += 1;
    }

    drafts
}
