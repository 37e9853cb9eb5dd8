//! Domain logic for the folio portfolio backend.
//!
//! Everything here is free of I/O so it can be exercised directly by unit
//! tests and shared by the persistence and HTTP layers.

pub mod error;
pub mod manifest;
pub mod media;
pub mod roles;
pub mod secret;
pub mod types;
pub mod uploads;
pub mod validation;
