//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`session`] -- Session token issuance/validation and the session cookie.

pub mod password;
pub mod session;
