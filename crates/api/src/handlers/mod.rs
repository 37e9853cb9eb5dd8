pub mod admin_project;
pub mod auth;
pub mod project;
