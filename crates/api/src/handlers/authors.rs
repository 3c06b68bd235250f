//! Handlers for the `/authors` aggregate.

use axum::extract::State;
use axum::Json;
use bloglist_db::models::blog::AuthorStats;
use bloglist_db::repositories::BlogRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/authors
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<AuthorStats>>> {
    let stats = BlogRepo::author_stats(&state.pool).await?;
    Ok(Json(stats))
}
