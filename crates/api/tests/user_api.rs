//! HTTP-level integration tests for the `/api/users` resource.

mod common;

use axum::http::StatusCode;
use bloglist_db::repositories::ReadingListRepo;
use common::{
    body_json, create_test_user, get, login_for_token, post_json, post_json_auth,
    put_json_auth, TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

fn signup(username: &str) -> serde_json::Value {
    json!({ "name": "Ada Lovelace", "username": username, "password": TEST_PASSWORD })
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_user(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/users", signup("ada@example.com")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert!(json["id"].is_number());
    assert_eq!(json["username"], "ada@example.com");
    assert_eq!(json["name"], "Ada Lovelace");
    assert_eq!(json["disabled"], false);
    assert!(json.get("password_hash").is_none());
    assert!(json.get("password").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_user_validation(pool: PgPool) {
    let invalid = [
        json!({ "name": "Ada", "username": "not-an-email", "password": TEST_PASSWORD }),
        json!({ "name": "Ada", "username": "ada@example.com", "password": "short" }),
        json!({ "name": "Ada", "username": "ada@example.com", "password": "has spaces in it!" }),
        json!({ "name": "   ", "username": "ada@example.com", "password": TEST_PASSWORD }),
        json!({ "username": "ada@example.com", "password": TEST_PASSWORD }),
    ];
    for body in invalid {
        let app = common::build_test_app(pool.clone());
        let response = post_json(app, "/api/users", body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_user_duplicate_username(pool: PgPool) {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/users",
        signup("ada@example.com"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json(
        common::build_test_app(pool),
        "/api/users",
        signup("ada@example.com"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_users(pool: PgPool) {
    create_test_user(&pool, "ada@example.com").await;
    create_test_user(&pool, "grace@example.com").await;

    let response = get(common::build_test_app(pool), "/api/users").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let users = json.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_user_with_readings(pool: PgPool) {
    let user = create_test_user(&pool, "ada@example.com").await;
    let token = login_for_token(
        common::build_test_app(pool.clone()),
        "ada@example.com",
        TEST_PASSWORD,
    )
    .await;

    let mut blog_ids = Vec::new();
    for title in ["First", "Second"] {
        let body = json!({ "url": "https://example.com", "title": title, "year": 2000 });
        let response =
            post_json_auth(common::build_test_app(pool.clone()), "/api/blogs", body, &token).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        blog_ids.push(body_json(response).await["id"].as_i64().unwrap());
    }
    let first = ReadingListRepo::create(&pool, user.id, blog_ids[0])
        .await
        .unwrap();
    ReadingListRepo::create(&pool, user.id, blog_ids[1])
        .await
        .unwrap();
    ReadingListRepo::set_read(&pool, first.id, true)
        .await
        .unwrap();

    let uri = format!("/api/users/{}", user.id);
    let response = get(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["username"], "ada@example.com");
    assert!(json.get("password_hash").is_none());
    assert_eq!(json["readings"].as_array().unwrap().len(), 2);

    let response = get(common::build_test_app(pool.clone()), &format!("{uri}?read=true")).await;
    let json = body_json(response).await;
    let readings = json["readings"].as_array().unwrap();
    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0]["title"], "First");
    assert_eq!(readings[0]["read"], true);
    assert_eq!(readings[0]["entry_id"], first.id);

    let response = get(common::build_test_app(pool), &format!("{uri}?read=false")).await;
    let json = body_json(response).await;
    let readings = json["readings"].as_array().unwrap();
    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0]["title"], "Second");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_get_unknown_user(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/users/999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unparseable_id_or_filter_is_a_json_400(pool: PgPool) {
    for uri in ["/api/users/abc", "/api/users/1.5", "/api/users/1?read=maybe"] {
        let response = get(common::build_test_app(pool.clone()), uri).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST", "{uri}");
        assert!(json["error"].is_string(), "{uri}");
    }
}

// ---------------------------------------------------------------------------
// Rename
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_rename_other_user_forbidden(pool: PgPool) {
    create_test_user(&pool, "ada@example.com").await;
    create_test_user(&pool, "grace@example.com").await;
    let token = login_for_token(
        common::build_test_app(pool.clone()),
        "ada@example.com",
        TEST_PASSWORD,
    )
    .await;

    let response = put_json_auth(
        common::build_test_app(pool),
        "/api/users/grace@example.com",
        json!({ "username": "hijacked@example.com" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_rename_self(pool: PgPool) {
    create_test_user(&pool, "ada@example.com").await;
    let token = login_for_token(
        common::build_test_app(pool.clone()),
        "ada@example.com",
        TEST_PASSWORD,
    )
    .await;

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        "/api/users/ada@example.com",
        json!({ "username": "countess@example.com" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["username"], "countess@example.com");

    // The token still names the old username.
    let body = json!({ "url": "https://example.com", "title": "After", "year": 2000 });
    let response =
        post_json_auth(common::build_test_app(pool.clone()), "/api/blogs", body, &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    login_for_token(
        common::build_test_app(pool),
        "countess@example.com",
        TEST_PASSWORD,
    )
    .await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_rename_to_invalid_username(pool: PgPool) {
    create_test_user(&pool, "ada@example.com").await;
    let token = login_for_token(
        common::build_test_app(pool.clone()),
        "ada@example.com",
        TEST_PASSWORD,
    )
    .await;

    let response = put_json_auth(
        common::build_test_app(pool),
        "/api/users/ada@example.com",
        json!({ "username": "not-an-email" }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
