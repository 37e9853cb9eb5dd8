//! Authorization extractors.
//!
//! - [`auth::AdminContext`] -- The caller's admin role, read from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires a role that may create projects.
//! - [`rbac::RequireEditor`] -- Requires a role that may edit and delete projects.

pub mod auth;
pub mod rbac;
