//! Reading list entries.

use bloglist_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `reading_lists` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReadingListEntry {
    pub id: DbId,
    pub user_id: DbId,
    pub blog_id: DbId,
    pub read: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A blog as it appears on a user's reading list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReadingListBlog {
    /// The reading list entry id (used to mark the blog read).
    pub entry_id: DbId,
    pub read: bool,
    pub blog_id: DbId,
    pub author: Option<String>,
    pub url: String,
    pub title: String,
    pub likes: i64,
    pub year: i32,
}
