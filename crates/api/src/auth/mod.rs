//! Admin authentication primitives.
//!
//! - [`passwords`] -- shared admin passwords and the role each one grants.
//! - [`jwt`] -- access-token generation and validation.

pub mod jwt;
pub mod passwords;
