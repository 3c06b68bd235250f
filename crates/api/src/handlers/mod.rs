//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers delegate to the corresponding repository in `bloglist_db` and map
//! errors via [`AppError`](crate::error::AppError).

pub mod auth;
pub mod authors;
pub mod blogs;
pub mod reading_lists;
pub mod users;
