//! Domain rules for the blog list platform.
//!
//! Nothing in this crate performs I/O. The database and HTTP crates depend on
//! it for error types, session validity rules, bearer-header parsing and
//! request validation.

pub mod auth;
pub mod error;
pub mod session;
pub mod types;
pub mod validation;
