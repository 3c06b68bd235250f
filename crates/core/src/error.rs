use crate::types::DbId;

/// Domain failures shared by every layer.
///
/// The `Display` text of each variant is the message clients see, so it is
/// phrased for them and carries no variant prefix.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Lookup by a natural key such as a username.
    #[error("{entity} '{key}' not found")]
    NotFoundByKey { entity: &'static str, key: String },

    /// User input broke a rule; the message says which.
    #[error("{0}")]
    Validation(String),

    /// A caller handed a repository an argument it must never receive,
    /// such as an empty username where a concrete owner is required.
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_client_facing() {
        let err = CoreError::NotFound {
            entity: "Blog",
            id: 7,
        };
        assert_eq!(err.to_string(), "Blog with id 7 not found");

        let err = CoreError::NotFoundByKey {
            entity: "User",
            key: "ada@example.com".into(),
        };
        assert_eq!(err.to_string(), "User 'ada@example.com' not found");

        assert_eq!(
            CoreError::Validation("Likes must not be negative".into()).to_string(),
            "Likes must not be negative"
        );
    }
}
