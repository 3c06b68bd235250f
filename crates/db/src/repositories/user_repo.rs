//! Repository for the `users` table.

use bloglist_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Every column of `users`, in [`User`] field order.
const COLUMNS: &str = "id, name, username, password_hash, disabled, created_at, updated_at";

/// Accounts. Username renames and deletes reach `sessions` through the
/// FK cascade, so callers never touch sessions directly here except when
/// disabling.
pub struct UserRepo;

impl UserRepo {
    /// Insert an account. A taken username fails on `uq_users_username`.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, username, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.username)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Exact, case-sensitive match; this is how tokens name their owner.
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(exists)
    }

    /// All accounts, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Rename a user. Sessions follow the rename through `ON UPDATE CASCADE`.
    ///
    /// Returns `None` if no user has the old username.
    pub async fn update_username(
        pool: &PgPool,
        username: &str,
        new_username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET username = $2
             WHERE username = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .bind(new_username)
            .fetch_optional(pool)
            .await
    }

    /// Set or clear the `disabled` flag.
    ///
    /// Disabling also deletes every session the user holds, in the same
    /// transaction. Returns `false` if no such user exists.
    pub async fn set_disabled(
        pool: &PgPool,
        username: &str,
        disabled: bool,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query("UPDATE users SET disabled = $2 WHERE username = $1")
            .bind(username)
            .bind(disabled)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        if disabled {
            let sessions = sqlx::query("DELETE FROM sessions WHERE username = $1")
                .bind(username)
                .execute(&mut *tx)
                .await?;
            tracing::info!(
                username,
                sessions_deleted = sessions.rows_affected(),
                "User disabled"
            );
        }

        tx.commit().await?;
        Ok(true)
    }

    /// Delete an account together with its sessions, blogs and reading
    /// list. `false` when no row matched.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
