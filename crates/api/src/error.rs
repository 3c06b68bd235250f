use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use bloglist_core::auth::AuthRejection;
use bloglist_core::error::CoreError;
use bloglist_db::DbError;
use serde_json::json;

/// Message returned in place of anything that would leak internals.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

/// Everything a handler can fail with.
///
/// Every variant renders as `{"error": <message>, "code": <CODE>}`. The code
/// is stable and meant for clients; the message is for humans.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The `Authorization` header did not resolve to a user with a live
    /// session.
    #[error(transparent)]
    Auth(#[from] AuthRejection),

    /// Body was not JSON or did not have the expected fields.
    #[error(transparent)]
    Json(#[from] JsonRejection),

    /// A path segment did not parse, such as a non-numeric id.
    #[error(transparent)]
    Path(#[from] PathRejection),

    #[error(transparent)]
    Query(#[from] QueryRejection),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Core(core) => AppError::Core(core),
            DbError::Sqlx(sqlx) => AppError::Database(sqlx),
        }
    }
}

type ErrorParts = (StatusCode, &'static str, String);

fn internal() -> ErrorParts {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

impl AppError {
    fn parts(&self) -> ErrorParts {
        match self {
            AppError::Core(core) => core_parts(core),
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::Auth(rejection) => {
                // A missing user behind a live session is a data problem,
                // not a credential problem.
                let status = if rejection.is_unauthenticated() {
                    StatusCode::UNAUTHORIZED
                } else {
                    StatusCode::BAD_REQUEST
                };
                (status, rejection.code(), rejection.to_string())
            }
            AppError::Json(rejection) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", rejection.body_text())
            }
            AppError::Path(rejection) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", rejection.body_text())
            }
            AppError::Query(rejection) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", rejection.body_text())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Handler failed");
                internal()
            }
        }
    }
}

fn core_parts(err: &CoreError) -> ErrorParts {
    let msg = err.to_string();
    match err {
        CoreError::NotFound { .. } | CoreError::NotFoundByKey { .. } => {
            (StatusCode::NOT_FOUND, "NOT_FOUND", msg)
        }
        CoreError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
        CoreError::InvalidArgument(_) => {
            // Handlers validate first, so reaching here is a bug upstream.
            tracing::warn!(error = %msg, "Invalid argument reached the API layer");
            (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT", msg)
        }
        CoreError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg),
        CoreError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        (status, axum::Json(json!({ "error": message, "code": code }))).into_response()
    }
}

/// Map a sqlx error onto the response a client should see.
///
/// Only constraint violations carry a client-facing explanation: a
/// duplicate on a `uq_*` constraint is 409, a dangling foreign key or a
/// failed check is 400. Everything else is logged and answered with a bare
/// 500.
fn classify_sqlx_error(err: &sqlx::Error) -> ErrorParts {
    if let sqlx::Error::RowNotFound = err {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }

    if let sqlx::Error::Database(db_err) = err {
        let constraint = db_err.constraint().unwrap_or("unknown");
        match db_err.code().as_deref() {
            Some("23505") if constraint.starts_with("uq_") => {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                );
            }
            Some("23503") => {
                return (
                    StatusCode::BAD_REQUEST,
                    "INVALID_REFERENCE",
                    format!("Referenced row does not exist: {constraint}"),
                );
            }
            Some("23514") => {
                return (
                    StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    format!("Value violates check constraint: {constraint}"),
                );
            }
            _ => {}
        }
    }

    tracing::error!(error = %err, "Unclassified database error");
    internal()
}
