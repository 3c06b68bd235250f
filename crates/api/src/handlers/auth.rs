//! Handlers for login and logout.

use axum::body::Bytes;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bloglist_core::error::CoreError;
use bloglist_core::session::SessionScope;
use bloglist_core::validation::parse_logout_body;
use bloglist_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::{verify_against_dummy, verify_password};
use crate::auth::token::{self, Claims};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// One message for both unknown usernames and wrong passwords.
const INVALID_CREDENTIALS: &str = "Invalid username or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/login
///
/// Verify credentials, open a new session and return a bearer token for it.
/// Existing sessions of the user are left alone.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(input) = payload?;
    let username = input.username.filter(|u| !u.is_empty());
    let password = input.password.filter(|p| !p.is_empty());
    let (Some(username), Some(password)) = (username, password) else {
        return Err(AppError::BadRequest(
            "username and password must be passed".into(),
        ));
    };

    let Some(user) = UserRepo::find_by_username(&state.pool, &username).await? else {
        verify_against_dummy(&password);
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    };

    let password_valid = verify_password(&password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    if user.disabled {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is disabled".into(),
        )));
    }

    let session = SessionRepo::create(&state.pool, &user.username).await?;

    let claims = Claims {
        username: user.username.clone(),
        session_id: session.session_id.to_string(),
    };
    let token = token::sign(&claims, &state.config.token)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, session_id = %session.session_id, "User logged in");

    Ok(Json(LoginResponse {
        token,
        username: user.username,
        name: user.name,
    }))
}

/// DELETE /api/logout
///
/// Body must be `{"all": true}` or `{"all": false}`. `false` ends only the
/// session behind the presented token; `true` ends every session of the
/// user. Returns 204 No Content.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
    body: Bytes,
) -> AppResult<StatusCode> {
    let all = parse_logout_body(&body)?;
    let scope = if all {
        SessionScope::All
    } else {
        SessionScope::One(auth_user.session_id)
    };

    SessionRepo::delete(&state.pool, &auth_user.username, scope).await?;
    Ok(StatusCode::NO_CONTENT)
}
