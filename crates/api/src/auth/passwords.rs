//! Shared admin passwords.
//!
//! There are no user accounts. `ADMIN_PASSWORD` unlocks project creation and
//! the optional `ADMIN_EDIT_PASSWORD` additionally unlocks editing, deleting,
//! and cover selection. Without an edit password the admin password unlocks
//! everything.

use folio_core::roles::{ROLE_ADMIN, ROLE_EDITOR};
use folio_core::secret::secrets_match;

#[derive(Clone)]
pub struct AdminPasswords {
    pub admin: String,
    pub editor: Option<String>,
}

impl std::fmt::Debug for AdminPasswords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminPasswords")
            .field("admin", &"<redacted>")
            .field("editor", &self.editor.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AdminPasswords {
    /// Load passwords from the environment.
    ///
    /// | Env Var               | Required |
    /// |-----------------------|----------|
    /// | `ADMIN_PASSWORD`      | **yes**  |
    /// | `ADMIN_EDIT_PASSWORD` | no       |
    ///
    /// # Panics
    ///
    /// Panics if `ADMIN_PASSWORD` is not set or is empty.
    pub fn from_env() -> Self {
        let admin =
            std::env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD must be set in the environment");
        assert!(!admin.is_empty(), "ADMIN_PASSWORD must not be empty");

        let editor = std::env::var("ADMIN_EDIT_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty());

        Self { admin, editor }
    }

    /// Resolve the role a submitted password grants, if any.
    pub fn role_for(&self, candidate: &str, key: &[u8]) -> Option<&'static str> {
        match &self.editor {
            Some(editor) if secrets_match(candidate, editor, key) => Some(ROLE_EDITOR),
            Some(_) if secrets_match(candidate, &self.admin, key) => Some(ROLE_ADMIN),
            None if secrets_match(candidate, &self.admin, key) => Some(ROLE_EDITOR),
            _ => None,
        }
    }
}
