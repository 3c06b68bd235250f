//! Bearer-token authentication extractors for Axum handlers.
//!
//! A token alone is not enough: the (username, session id) pair it carries
//! must name a session that is still valid server-side. Logging out or
//! disabling a user therefore revokes outstanding tokens immediately.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use bloglist_core::auth::{parse_bearer, AuthRejection};
use bloglist_core::error::CoreError;
use bloglist_core::types::DbId;
use bloglist_db::repositories::{SessionRepo, UserRepo};
use bloglist_db::DbError;
use uuid::Uuid;

use crate::auth::token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from the `Authorization: Bearer <token>` header.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub username: String,
    pub name: String,
    /// The session the presented token belongs to.
    pub session_id: Uuid,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthRejection::MissingAuthHeader)?;
        let value = header
            .to_str()
            .map_err(|_| AuthRejection::MalformedAuthHeader)?;

        resolve(state, value).await
    }
}

/// Resolve an `Authorization` header value to the user it authenticates.
///
/// Checks, in order: header shape, token signature, payload claims, session
/// validity (expired sessions are cleaned up on the way), and finally that
/// the user still exists and is not disabled. Resolving never refreshes or
/// extends the session.
pub async fn resolve(state: &AppState, header: &str) -> Result<AuthUser, AppError> {
    let raw_token = parse_bearer(header)?;
    let claims = token::verify(raw_token, &state.config.token)?;

    // A session id that is not a UUID cannot name any stored session.
    let session_id =
        Uuid::parse_str(&claims.session_id).map_err(|_| AuthRejection::NoValidSession)?;

    let checked = SessionRepo::is_valid(&state.pool, &claims.username, session_id, true).await;
    let valid = match checked {
        Ok(valid) => valid,
        // An empty username in a signed token names no session.
        Err(DbError::Core(CoreError::InvalidArgument(_))) => false,
        Err(e) => return Err(e.into()),
    };
    if !valid {
        tracing::debug!(
            username = %claims.username,
            %session_id,
            "Rejected token without a valid session"
        );
        return Err(AuthRejection::NoValidSession.into());
    }

    let user = UserRepo::find_by_username(&state.pool, &claims.username)
        .await?
        .ok_or(AuthRejection::UnknownUser)?;

    // Disabling deletes sessions, but a login racing with it can still insert
    // one after the delete has run.
    if user.disabled {
        tracing::debug!(user_id = user.id, %session_id, "Rejected token of disabled user");
        return Err(AuthRejection::NoValidSession.into());
    }

    Ok(AuthUser {
        user_id: user.id,
        username: user.username,
        name: user.name,
        session_id,
    })
}
