//! Request extractors for authentication, access control and flash notices.
//!
//! - [`auth::AuthUser`] -- The logged-in user from the session cookie or a Bearer token.
//! - [`auth::MaybeUser`] -- The logged-in user, if any.
//! - [`rbac::RequireAdmin`] -- Requires the admin flag.
//! - [`flash`] -- One-shot notices carried across redirects.

pub mod auth;
pub mod flash;
pub mod rbac;
