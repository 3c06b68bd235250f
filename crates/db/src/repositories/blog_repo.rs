//! Repository for the `blogs` table.

use bloglist_core::types::DbId;
use sqlx::PgPool;

use crate::models::blog::{AuthorStats, Blog, CreateBlog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, author, url, title, likes, year, created_at, updated_at";

/// Provides CRUD operations and aggregates for blogs.
pub struct BlogRepo;

impl BlogRepo {
    /// Insert a new blog, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBlog) -> Result<Blog, sqlx::Error> {
        let query = format!(
            "INSERT INTO blogs (user_id, author, url, title, year, likes)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(input.user_id)
            .bind(&input.author)
            .bind(&input.url)
            .bind(&input.title)
            .bind(input.year)
            .bind(input.likes)
            .fetch_one(pool)
            .await
    }

    /// Find a blog by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blogs WHERE id = $1");
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List blogs, most liked first.
    ///
    /// With `search`, only blogs whose title or author contains the term
    /// (case-insensitive) are returned.
    pub async fn list(pool: &PgPool, search: Option<&str>) -> Result<Vec<Blog>, sqlx::Error> {
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(like_pattern);

        let query = format!(
            "SELECT {COLUMNS} FROM blogs
             WHERE $1::TEXT IS NULL OR title ILIKE $1 OR author ILIKE $1
             ORDER BY likes DESC, id"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    /// Set the like count. Returns `None` if the blog does not exist.
    pub async fn update_likes(
        pool: &PgPool,
        id: DbId,
        likes: i64,
    ) -> Result<Option<Blog>, sqlx::Error> {
        let query = format!(
            "UPDATE blogs SET likes = $2
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Blog>(&query)
            .bind(id)
            .bind(likes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a blog. Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Article and like totals per author, most liked author first.
    pub async fn author_stats(pool: &PgPool) -> Result<Vec<AuthorStats>, sqlx::Error> {
        sqlx::query_as::<_, AuthorStats>(
            "SELECT author,
                    COUNT(*) AS articles,
                    COALESCE(SUM(likes), 0)::BIGINT AS likes
             FROM blogs
             GROUP BY author
             ORDER BY likes DESC, author",
        )
        .fetch_all(pool)
        .await
    }
}

/// Build an `ILIKE` pattern matching `term` anywhere, with the wildcard
/// characters inside `term` escaped.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_wraps_and_escapes() {
        assert_eq!(like_pattern("rust"), "%rust%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }
}
