pub mod auth;
pub mod authors;
pub mod blogs;
pub mod health;
pub mod reading_lists;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                       login (public)
/// /logout                      logout one or all sessions (requires auth)
///
/// /users                       list, create
/// /users/{id}                  get with reading list (?read=)
/// /users/{username}            change username (PUT, requires auth as that user)
///
/// /blogs                       list (?search=), create (requires auth)
/// /blogs/{id}                  set likes (PUT), delete (requires auth, creator only)
///
/// /authors                     per-author totals
///
/// /readinglists                add a blog to a user's list
/// /readinglists/{id}           mark read/unread (requires auth, owner only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/users", users::router())
        .nest("/blogs", blogs::router())
        .nest("/authors", authors::router())
        .nest("/readinglists", reading_lists::router())
}
