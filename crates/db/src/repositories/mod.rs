//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod blog_repo;
pub mod reading_list_repo;
pub mod session_repo;
pub mod user_repo;

pub use blog_repo::BlogRepo;
pub use reading_list_repo::ReadingListRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
