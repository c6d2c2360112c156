//! Shared test harness: a fully-layered router over a real database, plus
//! small HTTP helpers.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

use timebank_api::auth::StaticTokenAuth;
use timebank_api::config::ServerConfig;
use timebank_api::router::build_app_router;
use timebank_api::state::AppState;
use timebank_core::rate_limit::RateLimiter;
use timebank_db::models::member::{CreateMember, Member};
use timebank_db::services::members;

/// Bearer token resolving to user `u-member` with the `member` role.
pub const MEMBER_TOKEN: &str = "member-token";
/// Bearer token resolving to user `u-moderator` with the `moderator` role.
pub const MODERATOR_TOKEN: &str = "moderator-token";
/// Bearer token resolving to user `u-admin` with the `admin` role.
pub const ADMIN_TOKEN: &str = "admin-token";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        rate_limit_max: 1000,
        rate_limit_window_secs: 60,
        api_tokens: String::new(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a generous rate limit.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses.
pub fn build_test_app(pool: SqlitePool) -> Router {
    build_test_app_with_limit(pool, 1000)
}

/// Same as [`build_test_app`] but with an explicit rate limit, for tests
/// that exercise 429 behaviour.
pub fn build_test_app_with_limit(pool: SqlitePool, rate_limit_max: usize) -> Router {
    let config = test_config();

    let auth = StaticTokenAuth::new()
        .with_token(MEMBER_TOKEN, "u-member", "member")
        .with_token(MODERATOR_TOKEN, "u-moderator", "moderator")
        .with_token(ADMIN_TOKEN, "u-admin", "admin");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        auth: Arc::new(auth),
        public_limiter: Arc::new(RateLimiter::new(rate_limit_max, Duration::from_secs(60))),
    };

    build_app_router(state, &config)
}

/// Enroll a member row for one of the fixed test users.
pub async fn enroll_user(pool: &SqlitePool, user_id: &str, role: Option<&str>) -> Member {
    members::enroll(
        pool,
        CreateMember {
            user_id: user_id.to_string(),
            name: format!("test {user_id}"),
            contact: format!("{user_id}@example.org"),
            area: "center".to_string(),
            role: role.map(str::to_string),
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    app.oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, "POST", uri, token, body).await
}

pub async fn patch_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, "PATCH", uri, token, body).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert an error envelope: the given status plus `code` in the body.
pub async fn assert_error(response: Response<Body>, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code);
    assert!(json["error"].is_string());
}
