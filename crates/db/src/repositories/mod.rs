//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod media_repo;
pub mod project_repo;

pub use media_repo::MediaRepo;
pub use project_repo::ProjectRepo;
