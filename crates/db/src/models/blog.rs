//! Blog entity model, DTOs and the per-author aggregate.

use bloglist_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A blog row from the `blogs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Blog {
    pub id: DbId,
    pub user_id: DbId,
    pub author: Option<String>,
    pub url: String,
    pub title: String,
    pub likes: i64,
    pub year: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a blog. `user_id` is the authenticated creator.
#[derive(Debug)]
pub struct CreateBlog {
    pub user_id: DbId,
    pub author: Option<String>,
    pub url: String,
    pub title: String,
    pub year: i32,
    pub likes: i64,
}

/// Blog totals grouped by author.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorStats {
    pub author: Option<String>,
    pub articles: i64,
    pub likes: i64,
}
