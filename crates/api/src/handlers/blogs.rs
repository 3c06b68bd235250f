//! Handlers for the `/blogs` resource.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bloglist_core::error::CoreError;
use bloglist_core::types::DbId;
use bloglist_core::validation::{validate_blog_url, validate_likes, validate_title, validate_year};
use bloglist_db::models::blog::{Blog, CreateBlog};
use bloglist_db::repositories::BlogRepo;
use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// `?search=` filter on title or author.
#[derive(Debug, Deserialize)]
pub struct BlogSearch {
    pub search: Option<String>,
}

/// Request body for `POST /api/blogs`.
#[derive(Debug, Deserialize)]
pub struct CreateBlogRequest {
    pub author: Option<String>,
    pub url: String,
    pub title: String,
    pub year: i32,
    pub likes: Option<i64>,
}

/// Body of `PUT /api/blogs/{id}`, echoed back on success.
#[derive(Debug, Deserialize, Serialize)]
pub struct LikesUpdate {
    pub likes: i64,
}

/// GET /api/blogs
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<BlogSearch>, QueryRejection>,
) -> AppResult<Json<Vec<Blog>>> {
    let Query(params) = query?;
    let blogs = BlogRepo::list(&state.pool, params.search.as_deref()).await?;
    Ok(Json(blogs))
}

/// POST /api/blogs
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    payload: Result<Json<CreateBlogRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Blog>)> {
    let Json(input) = payload?;
    let likes = input.likes.unwrap_or(0);

    validate_title(&input.title)?;
    validate_blog_url(&input.url)?;
    validate_year(input.year, Utc::now().year())?;
    validate_likes(likes)?;

    let author = input
        .author
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty());

    let blog = BlogRepo::create(
        &state.pool,
        &CreateBlog {
            user_id: auth_user.user_id,
            author,
            url: input.url.trim().to_string(),
            title: input.title.trim().to_string(),
            year: input.year,
            likes,
        },
    )
    .await?;

    tracing::info!(blog_id = blog.id, user_id = auth_user.user_id, "Blog created");
    Ok((StatusCode::CREATED, Json(blog)))
}

/// PUT /api/blogs/{id}
pub async fn update_likes(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<LikesUpdate>, JsonRejection>,
) -> AppResult<Json<LikesUpdate>> {
    let Path(id) = path?;
    let Json(input) = payload?;
    validate_likes(input.likes)?;

    let blog = BlogRepo::update_likes(&state.pool, id, input.likes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Blog", id }))?;

    Ok(Json(LikesUpdate { likes: blog.likes }))
}

/// DELETE /api/blogs/{id}
///
/// Only the user who added a blog may delete it.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    path: Result<Path<DbId>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    let blog = BlogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Blog", id }))?;

    if blog.user_id != auth_user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the creator of a blog can delete it".into(),
        )));
    }

    if BlogRepo::delete(&state.pool, id).await? {
        tracing::info!(blog_id = id, user_id = auth_user.user_id, "Blog deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Blog", id }))
    }
}
