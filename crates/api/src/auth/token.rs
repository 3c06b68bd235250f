//! Bearer token signing and verification.
//!
//! Tokens are HS256-signed JWTs whose payload is exactly [`Claims`]. They carry
//! no expiry: a token is usable for as long as the session it names is valid
//! server-side, so revoking the session revokes the token.

use bloglist_core::auth::AuthRejection;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload embedded in every bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    /// The session's id in its textual UUID form.
    pub session_id: String,
}

/// Configuration for token signing and verification.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
}

impl TokenConfig {
    /// Load token configuration from environment variables.
    ///
    /// | Env Var        | Required | Default |
    /// |----------------|----------|---------|
    /// | `TOKEN_SECRET` | **yes**  | --      |
    ///
    /// # Panics
    ///
    /// Panics if `TOKEN_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("TOKEN_SECRET").expect("TOKEN_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "TOKEN_SECRET must not be empty");
        Self { secret }
    }
}

/// Sign `claims` into a compact HS256 token.
pub fn sign(claims: &Claims, config: &TokenConfig) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify a token and extract its [`Claims`].
///
/// A bad signature or structurally invalid token is
/// [`AuthRejection::InvalidToken`]. A token that verifies but lacks a string
/// `username` or `session_id` is [`AuthRejection::MalformedPayload`].
pub fn verify(token: &str, config: &TokenConfig) -> Result<Claims, AuthRejection> {
    let payload = decode::<Value>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation(),
    )
    .map_err(|e| {
        tracing::debug!(error = %e, "Token verification failed");
        AuthRejection::InvalidToken
    })?
    .claims;

    let claim = |name: &str| {
        payload
            .get(name)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(AuthRejection::MalformedPayload)
    };

    Ok(Claims {
        username: claim("username")?,
        session_id: claim("session_id")?,
    })
}

/// HS256 only, with no registered claims required or checked.
fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;
    validation
}
