//! Session model.

use bloglist_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use uuid::Uuid;

/// One login of one user on one device, from the `sessions` table.
///
/// A passive record: lifecycle changes go through
/// [`SessionRepo`](crate::repositories::SessionRepo).
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub username: String,
    /// Random per-login id embedded in the bearer token.
    pub session_id: Uuid,
    /// `None` means valid until explicitly invalidated.
    pub valid_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
