//! Repository for the `reading_lists` table.

use bloglist_core::types::DbId;
use sqlx::PgPool;

use crate::models::reading_list::{ReadingListBlog, ReadingListEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, blog_id, read, created_at, updated_at";

/// Provides reading list membership operations.
pub struct ReadingListRepo;

impl ReadingListRepo {
    /// Add a blog to a user's reading list, unread.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        blog_id: DbId,
    ) -> Result<ReadingListEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO reading_lists (user_id, blog_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReadingListEntry>(&query)
            .bind(user_id)
            .bind(blog_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ReadingListEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reading_lists WHERE id = $1");
        sqlx::query_as::<_, ReadingListEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether the blog is already on the user's reading list.
    pub async fn exists(pool: &PgPool, user_id: DbId, blog_id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM reading_lists WHERE user_id = $1 AND blog_id = $2)",
        )
        .bind(user_id)
        .bind(blog_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// Mark an entry read or unread. Returns `None` if it does not exist.
    pub async fn set_read(
        pool: &PgPool,
        id: DbId,
        read: bool,
    ) -> Result<Option<ReadingListEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE reading_lists SET read = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReadingListEntry>(&query)
            .bind(id)
            .bind(read)
            .fetch_optional(pool)
            .await
    }

    /// Blogs on a user's reading list, optionally filtered by read state.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        read: Option<bool>,
    ) -> Result<Vec<ReadingListBlog>, sqlx::Error> {
        sqlx::query_as::<_, ReadingListBlog>(
            "SELECT rl.id AS entry_id, rl.read, b.id AS blog_id,
                    b.author, b.url, b.title, b.likes, b.year
             FROM reading_lists rl
             JOIN blogs b ON b.id = rl.blog_id
             WHERE rl.user_id = $1 AND ($2::BOOLEAN IS NULL OR rl.read = $2)
             ORDER BY rl.id",
        )
        .bind(user_id)
        .bind(read)
        .fetch_all(pool)
        .await
    }
}
