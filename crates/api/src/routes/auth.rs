//! Route definitions for login and logout.

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at the `/api` root.
///
/// ```text
/// POST   /login   -> login
/// DELETE /logout  -> logout (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", delete(auth::logout))
}
