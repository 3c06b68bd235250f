//! Bearer-header parsing and the authentication rejection taxonomy.

/// The only accepted `Authorization` scheme.
pub const BEARER_SCHEME: &str = "Bearer";

/// Why a request could not be resolved to an authenticated user.
///
/// Every variant except [`AuthRejection::UnknownUser`] is a credential
/// problem (401). `UnknownUser` means the token and session were fine but the
/// user row is gone, which is reported as a 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthRejection {
    #[error("Missing Authorization header")]
    MissingAuthHeader,

    #[error("Invalid Authorization format. Expected: Bearer <token>")]
    MalformedAuthHeader,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token payload must carry string username and session_id claims")]
    MalformedPayload,

    #[error("No valid session for this token")]
    NoValidSession,

    #[error("User referenced by this token does not exist")]
    UnknownUser,
}

impl AuthRejection {
    /// Stable machine-readable code for the JSON error body.
    pub fn code(&self) -> &'static str {
        match self {
            AuthRejection::MissingAuthHeader => "MISSING_AUTH_HEADER",
            AuthRejection::MalformedAuthHeader => "MALFORMED_AUTH_HEADER",
            AuthRejection::InvalidToken => "INVALID_TOKEN",
            AuthRejection::MalformedPayload => "MALFORMED_PAYLOAD",
            AuthRejection::NoValidSession => "NO_VALID_SESSION",
            AuthRejection::UnknownUser => "UNKNOWN_USER",
        }
    }

    /// `true` for the credential failures that map to 401.
    pub fn is_unauthenticated(&self) -> bool {
        !matches!(self, AuthRejection::UnknownUser)
    }
}

/// Extract the token from an `Authorization` header value.
///
/// Accepts exactly `Bearer <token>`: one space, a non-empty token, and no
/// other whitespace. Any other scheme is malformed.
pub fn parse_bearer(value: &str) -> Result<&str, AuthRejection> {
    let (scheme, token) = value
        .split_once(' ')
        .ok_or(AuthRejection::MalformedAuthHeader)?;

    if scheme != BEARER_SCHEME || token.is_empty() || token.contains(char::is_whitespace) {
        return Err(AuthRejection::MalformedAuthHeader);
    }
    Ok(token)
}

/// Format a token as an `Authorization` header value.
pub fn bearer_header(token: &str) -> String {
    format!("{BEARER_SCHEME} {token}")
}
