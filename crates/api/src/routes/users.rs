//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// The single-segment route serves two handlers: `GET` takes a numeric id,
/// `PUT` takes a username.
///
/// ```text
/// GET    /            -> list
/// POST   /            -> create
/// GET    /{key}       -> get_by_id
/// PUT    /{key}       -> update_username
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list).post(users::create))
        .route(
            "/{key}",
            get(users::get_by_id).put(users::update_username),
        )
}
