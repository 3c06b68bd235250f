//! Handlers for the `/readinglists` resource.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use bloglist_core::error::CoreError;
use bloglist_core::types::DbId;
use bloglist_db::models::reading_list::ReadingListEntry;
use bloglist_db::repositories::{BlogRepo, ReadingListRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /api/readinglists`.
#[derive(Debug, Deserialize)]
pub struct AddToReadingList {
    pub user_id: DbId,
    pub blog_id: DbId,
}

/// Request body for `PUT /api/readinglists/{id}`.
#[derive(Debug, Deserialize)]
pub struct MarkRead {
    pub read: bool,
}

/// POST /api/readinglists
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<AddToReadingList>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ReadingListEntry>)> {
    let Json(input) = payload?;

    if BlogRepo::find_by_id(&state.pool, input.blog_id)
        .await?
        .is_none()
    {
        return Err(AppError::BadRequest("invalid blog id".into()));
    }
    if !UserRepo::exists(&state.pool, input.user_id).await? {
        return Err(AppError::BadRequest("invalid user id".into()));
    }
    if ReadingListRepo::exists(&state.pool, input.user_id, input.blog_id).await? {
        return Err(AppError::BadRequest(
            "Blog is already on the reading list".into(),
        ));
    }

    let entry = ReadingListRepo::create(&state.pool, input.user_id, input.blog_id).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/readinglists/{id}
///
/// Only the owner of the reading list may mark its entries.
pub async fn set_read(
    State(state): State<AppState>,
    auth_user: AuthUser,
    path: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<MarkRead>, JsonRejection>,
) -> AppResult<Json<ReadingListEntry>> {
    let Path(id) = path?;
    let Json(input) = payload?;

    let entry = ReadingListRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ReadingListEntry",
            id,
        }))?;

    if entry.user_id != auth_user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only update your own reading list".into(),
        )));
    }

    let entry = ReadingListRepo::set_read(&state.pool, id, input.read)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "ReadingListEntry",
            id,
        }))?;
    Ok(Json(entry))
}
