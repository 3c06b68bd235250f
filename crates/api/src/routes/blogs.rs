//! Route definitions for the `/blogs` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::blogs;
use crate::state::AppState;

/// Routes mounted at `/blogs`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// PUT    /{id}    -> update_likes
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(blogs::list).post(blogs::create))
        .route("/{id}", put(blogs::update_likes).delete(blogs::delete))
}
