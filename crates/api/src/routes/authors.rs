//! Route definitions for the `/authors` aggregate.

use axum::routing::get;
use axum::Router;

use crate::handlers::authors;
use crate::state::AppState;

/// Routes mounted at `/authors`.
///
/// ```text
/// GET /   -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(authors::list))
}
