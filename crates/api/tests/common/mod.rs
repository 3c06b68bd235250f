//! Shared helpers for HTTP-level integration tests.
//!
//! Every test gets a fresh database from `#[sqlx::test]`; these helpers build
//! the production router on top of it and drive it with `oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use bloglist_api::auth::password::hash_password;
use bloglist_api::auth::token::TokenConfig;
use bloglist_api::config::ServerConfig;
use bloglist_api::router::build_app_router;
use bloglist_api::state::AppState;
use bloglist_core::auth::bearer_header;
use bloglist_db::models::user::{CreateUser, User};
use bloglist_db::repositories::UserRepo;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Secret the test router signs and verifies tokens with.
pub const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Password given to every user created by [`create_test_user`].
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        token: test_token_config(),
    }
}

pub fn test_token_config() -> TokenConfig {
    TokenConfig {
        secret: TEST_SECRET.to_string(),
    }
}

/// Build the full application router (same middleware stack as production)
/// over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user directly through the repository, with [`TEST_PASSWORD`].
pub async fn create_test_user(pool: &PgPool, username: &str) -> User {
    let input = CreateUser {
        name: format!("Name of {username}"),
        username: username.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

/// Log in through the API and return the bearer token.
pub async fn login_for_token(app: Router, username: &str, password: &str) -> String {
    let body = serde_json::json!({ "username": username, "password": password });
    let response = post_json(app, "/api/login", body).await;
    assert_eq!(response.status(), 200, "login should succeed");
    let json = body_json(response).await;
    json["token"]
        .as_str()
        .expect("login response must contain a token")
        .to_string()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", bearer_header(token));
    }
    builder.body(body).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None, Body::empty())).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, Some(token), Body::empty())).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, request(Method::POST, uri, None, Body::from(body.to_string()))).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let body = Body::from(body.to_string());
    send(app, request(Method::POST, uri, Some(token), body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, request(Method::PUT, uri, None, Body::from(body.to_string()))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let body = Body::from(body.to_string());
    send(app, request(Method::PUT, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::DELETE, uri, Some(token), Body::empty())).await
}

/// DELETE with a raw (possibly non-JSON) body.
pub async fn delete_raw(
    app: Router,
    uri: &str,
    body: &str,
    authorization: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }
    send(app, builder.body(Body::from(body.to_string())).unwrap()).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
