//! Repository for the `sessions` table.
//!
//! Every read and write of session state goes through here. Each method is a
//! single SQL statement, so bulk variants ([`SessionScope::All`]) are atomic
//! with respect to concurrent requests touching the same user.

use bloglist_core::session::{
    invalidated_at, status_of, validate_owner, SessionScope, SessionStatus,
};
use bloglist_core::types::Timestamp;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbError;
use crate::models::session::Session;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, session_id, valid_until, created_at, updated_at";

/// Session lifecycle operations.
pub struct SessionRepo;

impl SessionRepo {
    /// Start a new session for `username` with no expiry horizon.
    ///
    /// Existing sessions of the same user are left untouched. The user must
    /// exist; a missing user surfaces as a foreign-key violation.
    pub async fn create(pool: &PgPool, username: &str) -> Result<Session, DbError> {
        validate_owner(username)?;

        let query = format!(
            "INSERT INTO sessions (username, session_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let session = sqlx::query_as::<_, Session>(&query)
            .bind(username)
            .bind(Uuid::new_v4())
            .fetch_one(pool)
            .await?;

        tracing::debug!(username, session_id = %session.session_id, "Session created");
        Ok(session)
    }

    /// Fetch the session identified by the (username, session id) pair.
    pub async fn find(
        pool: &PgPool,
        username: &str,
        session_id: Uuid,
    ) -> Result<Option<Session>, DbError> {
        validate_owner(username)?;

        let query =
            format!("SELECT {COLUMNS} FROM sessions WHERE username = $1 AND session_id = $2");
        let session = sqlx::query_as::<_, Session>(&query)
            .bind(username)
            .bind(session_id)
            .fetch_optional(pool)
            .await?;
        Ok(session)
    }

    /// All sessions of a user, oldest first.
    pub async fn list_for_user(pool: &PgPool, username: &str) -> Result<Vec<Session>, DbError> {
        validate_owner(username)?;

        let query = format!("SELECT {COLUMNS} FROM sessions WHERE username = $1 ORDER BY id");
        let sessions = sqlx::query_as::<_, Session>(&query)
            .bind(username)
            .fetch_all(pool)
            .await?;
        Ok(sessions)
    }

    /// Number of session rows (valid or not) held by a user.
    pub async fn count_for_user(pool: &PgPool, username: &str) -> Result<i64, DbError> {
        validate_owner(username)?;

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM sessions WHERE username = $1")
            .bind(username)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Whether the session is currently valid.
    ///
    /// A missing row is `false`, not an error. When the row exists but has
    /// expired and `delete_if_invalid` is set, it is removed before returning.
    /// The removal only matches rows that are still expired, so it never
    /// undoes a concurrent [`reactivate`](Self::reactivate).
    pub async fn is_valid(
        pool: &PgPool,
        username: &str,
        session_id: Uuid,
        delete_if_invalid: bool,
    ) -> Result<bool, DbError> {
        validate_owner(username)?;

        let now = Utc::now();
        let row: Option<(Option<Timestamp>,)> = sqlx::query_as(
            "SELECT valid_until FROM sessions WHERE username = $1 AND session_id = $2",
        )
        .bind(username)
        .bind(session_id)
        .fetch_optional(pool)
        .await?;

        let status = status_of(row.map(|(valid_until,)| valid_until), now);

        if status == SessionStatus::Expired && delete_if_invalid {
            let result = sqlx::query(
                "DELETE FROM sessions
                 WHERE username = $1 AND session_id = $2
                   AND valid_until IS NOT NULL AND valid_until <= $3",
            )
            .bind(username)
            .bind(session_id)
            .bind(now)
            .execute(pool)
            .await?;
            tracing::debug!(
                username,
                %session_id,
                removed = result.rows_affected(),
                "Expired session cleaned up"
            );
        }

        Ok(status.is_valid())
    }

    /// Mark the scoped sessions invalid by moving `valid_until` into the past.
    /// Returns the number of rows updated.
    pub async fn invalidate(
        pool: &PgPool,
        username: &str,
        scope: SessionScope,
    ) -> Result<u64, DbError> {
        let valid_until = Some(invalidated_at(Utc::now()));
        let updated = Self::set_valid_until(pool, username, scope, valid_until).await?;
        tracing::info!(username, ?scope, updated, "Sessions invalidated");
        Ok(updated)
    }

    /// Clear `valid_until` on the scoped sessions, making them valid with no
    /// expiry. Returns the number of rows updated.
    pub async fn reactivate(
        pool: &PgPool,
        username: &str,
        scope: SessionScope,
    ) -> Result<u64, DbError> {
        let updated = Self::set_valid_until(pool, username, scope, None).await?;
        tracing::info!(username, ?scope, updated, "Sessions reactivated");
        Ok(updated)
    }

    /// Delete the scoped sessions. Returns the number of rows removed.
    pub async fn delete(
        pool: &PgPool,
        username: &str,
        scope: SessionScope,
    ) -> Result<u64, DbError> {
        validate_owner(username)?;

        let result = match scope {
            SessionScope::One(session_id) => {
                sqlx::query("DELETE FROM sessions WHERE username = $1 AND session_id = $2")
                    .bind(username)
                    .bind(session_id)
                    .execute(pool)
                    .await?
            }
            SessionScope::All => {
                sqlx::query("DELETE FROM sessions WHERE username = $1")
                    .bind(username)
                    .execute(pool)
                    .await?
            }
        };

        let deleted = result.rows_affected();
        tracing::info!(username, ?scope, deleted, "Sessions deleted");
        Ok(deleted)
    }

    async fn set_valid_until(
        pool: &PgPool,
        username: &str,
        scope: SessionScope,
        valid_until: Option<Timestamp>,
    ) -> Result<u64, DbError> {
        validate_owner(username)?;

        let result = match scope {
            SessionScope::One(session_id) => {
                sqlx::query(
                    "UPDATE sessions SET valid_until = $3 WHERE username = $1 AND session_id = $2",
                )
                .bind(username)
                .bind(session_id)
                .bind(valid_until)
                .execute(pool)
                .await?
            }
            SessionScope::All => {
                sqlx::query("UPDATE sessions SET valid_until = $2 WHERE username = $1")
                    .bind(username)
                    .bind(valid_until)
                    .execute(pool)
                    .await?
            }
        };
        Ok(result.rows_affected())
    }
}
