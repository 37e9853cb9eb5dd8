//! Required-field checks for the project create and edit forms.

use crate::error::CoreError;

/// Message shown when any core project field is missing.
pub const MISSING_FIELDS_MESSAGE: &str = "All fields are required";

/// Trimmed, known-non-empty project core fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectFields {
    pub name: String,
    pub short_description: String,
    pub project_type: String,
}

/// Check that name, short description, and type are all present.
///
/// Whitespace-only values count as missing. Returns the trimmed values.
pub fn validate_project_fields(
    name: Option<&str>,
    short_description: Option<&str>,
    project_type: Option<&str>,
) -> Result<ProjectFields, CoreError> {
    let required = |value: Option<&str>| {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .ok_or_else(|| CoreError::Validation(MISSING_FIELDS_MESSAGE.into()))
    };

    Ok(ProjectFields {
        name: required(name)?,
        short_description: required(short_description)?,
        project_type: required(project_type)?,
    })
}
