//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Resolves the bearer token to a user with a live session.

pub mod auth;
