//! Media kinds stored in `project_media.media_kind`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Kind name for uploaded still images.
pub const KIND_IMAGE: &str = "image";

/// Kind name for uploaded video files.
pub const KIND_VIDEO: &str = "video";

/// Kind name for YouTube links.
pub const KIND_YOUTUBE: &str = "youtube";

/// What a media row points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Youtube,
}

impl MediaKind {
    /// Parse from the database `media_kind` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            KIND_IMAGE => Ok(Self::Image),
            KIND_VIDEO => Ok(Self::Video),
            KIND_YOUTUBE => Ok(Self::Youtube),
            other => Err(CoreError::Validation(format!(
                "Unknown media kind '{other}'"
            ))),
        }
    }

    /// Name as stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => KIND_IMAGE,
            Self::Video => KIND_VIDEO,
            Self::Youtube => KIND_YOUTUBE,
        }
    }

    /// Classify an uploaded file by its declared content type.
    ///
    /// Anything whose type starts with `video` is a video; everything else,
    /// including a missing or unrecognised type, is treated as an image.
    pub fn for_upload(content_type: &str) -> Self {
        if content_type.starts_with("video") {
            Self::Video
        } else {
            Self::Image
        }
    }

    /// Whether media of this kind is backed by an uploaded file.
    pub fn is_upload(self) -> bool {
        self != Self::Youtube
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
