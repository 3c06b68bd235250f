//! Accounts.

use bloglist_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A `users` row. Not `Serialize`: it carries the password digest, and
/// responses go through [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub username: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    /// Disabled accounts cannot log in and hold no sessions.
    pub disabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// What the API shows of an account.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub name: String,
    pub username: String,
    pub disabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            username: user.username,
            disabled: user.disabled,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// DTO for creating a new user. The password is already hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub name: String,
    pub username: String,
    pub password_hash: String,
}
