//! Well-known role name constants carried in admin access tokens.

/// May create projects.
pub const ROLE_ADMIN: &str = "admin";

/// May create, edit, and delete projects and pick cover images.
pub const ROLE_EDITOR: &str = "editor";

/// Whether `role` carries edit rights.
pub fn can_edit(role: &str) -> bool {
    role == ROLE_EDITOR
}

/// Whether `role` may create projects.
pub fn can_create(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_EDITOR
}
