//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`token`] -- HS256 bearer tokens naming a (username, session id) pair.

pub mod password;
pub mod token;
