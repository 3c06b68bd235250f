//! Row models and DTOs.
//!
//! Each submodule holds a `FromRow` struct matching its table plus the
//! `Create*` DTO used for inserts.

pub mod blog;
pub mod reading_list;
pub mod session;
pub mod user;
