//! Handlers for the `/users` resource.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bloglist_core::error::CoreError;
use bloglist_core::types::DbId;
use bloglist_core::validation::{validate_name, validate_password, validate_username};
use bloglist_db::models::reading_list::ReadingListBlog;
use bloglist_db::models::user::{CreateUser, UserResponse};
use bloglist_db::repositories::{ReadingListRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /api/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub username: String,
    pub password: String,
}

/// Request body for `PUT /api/users/{username}`.
#[derive(Debug, Deserialize)]
pub struct UpdateUsernameRequest {
    pub username: String,
}

/// `?read=true|false` filter for a user's reading list.
#[derive(Debug, Deserialize)]
pub struct ReadingFilter {
    pub read: Option<bool>,
}

/// A user together with the blogs on their reading list.
#[derive(Debug, Serialize)]
pub struct UserWithReadings {
    #[serde(flatten)]
    pub user: UserResponse,
    pub readings: Vec<ReadingListBlog>,
}

/// POST /api/users
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let Json(input) = payload?;
    validate_name(&input.name)?;
    validate_username(&input.username)?;
    validate_password(&input.password)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name.trim().to_string(),
            username: input.username,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User created");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/users
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    path: Result<Path<DbId>, PathRejection>,
    query: Result<Query<ReadingFilter>, QueryRejection>,
) -> AppResult<Json<UserWithReadings>> {
    let Path(id) = path?;
    let Query(filter) = query?;
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    let readings = ReadingListRepo::list_for_user(&state.pool, id, filter.read).await?;

    Ok(Json(UserWithReadings {
        user: user.into(),
        readings,
    }))
}

/// PUT /api/users/{username}
///
/// Change the caller's own username. Sessions follow the rename, but tokens
/// issued under the old name stop resolving, so the client must log in again.
pub async fn update_username(
    State(state): State<AppState>,
    auth_user: AuthUser,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<UpdateUsernameRequest>, JsonRejection>,
) -> AppResult<Json<UserResponse>> {
    let Path(username) = path?;
    let Json(input) = payload?;

    if auth_user.username != username {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only change your own username".into(),
        )));
    }
    validate_username(&input.username)?;

    let user = UserRepo::update_username(&state.pool, &username, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "User",
                key: username.clone(),
            })
        })?;

    tracing::info!(user_id = user.id, "Username changed");
    Ok(Json(user.into()))
}
