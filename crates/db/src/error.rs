use bloglist_core::error::CoreError;

/// Errors raised by repositories that validate their arguments before
/// touching the database.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// The caller passed an argument the repository refuses to act on.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
