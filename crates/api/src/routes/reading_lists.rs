//! Route definitions for the `/readinglists` resource.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::reading_lists;
use crate::state::AppState;

/// Routes mounted at `/readinglists`.
///
/// ```text
/// POST /        -> create
/// PUT  /{id}    -> set_read
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(reading_lists::create))
        .route("/{id}", put(reading_lists::set_read))
}
