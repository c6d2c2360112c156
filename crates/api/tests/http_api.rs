//! HTTP-level integration tests: auth, RBAC, validation, rate limiting, and
//! the full session-completion flow through the router.

mod common;

use axum::http::StatusCode;
use common::{
    assert_error, body_json, build_test_app, build_test_app_with_limit, enroll_user, get,
    patch_json, post_json, ADMIN_TOKEN, MEMBER_TOKEN, MODERATOR_TOKEN,
};
use serde_json::json;
use sqlx::SqlitePool;

// ---------------------------------------------------------------------------
// Health and auth
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn health_requires_no_auth(pool: SqlitePool) {
    let app = build_test_app(pool);

    let response = get(app, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_token_is_unauthorized(pool: SqlitePool) {
    let app = build_test_app(pool);

    let response = get(app, "/api/v1/time-bank/me", None).await;
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_token_is_unauthorized(pool: SqlitePool) {
    let app = build_test_app(pool);

    let response = get(app, "/api/v1/time-bank/me", Some("bogus")).await;
    assert_error(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

// ---------------------------------------------------------------------------
// RBAC
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn enrollment_endpoint_is_admin_only(pool: SqlitePool) {
    let app = build_test_app(pool);

    let body = json!({
        "user_id": "u-new", "name": "Ana",
        "contact": "ana@example.org", "area": "north"
    });

    let response = post_json(
        app.clone(),
        "/api/v1/time-bank/members",
        Some(MEMBER_TOKEN),
        body.clone(),
    )
    .await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;

    let response = post_json(app, "/api/v1/time-bank/members", Some(ADMIN_TOKEN), body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], "u-new");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn report_resolution_requires_moderation_role(pool: SqlitePool) {
    let member = enroll_user(&pool, "u-member", None).await;
    enroll_user(&pool, "u-moderator", Some("moderator")).await;
    let app = build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/time-bank/reports",
        Some(MEMBER_TOKEN),
        json!({ "reason": "no-show" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;
    let report_id = report["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(report["data"]["reporter_member_id"], member.id.as_str());

    let uri = format!("/api/v1/time-bank/reports/{report_id}/resolve");
    let body = json!({ "resolution_action": "warning issued" });

    let response = post_json(app.clone(), &uri, Some(MEMBER_TOKEN), body.clone()).await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;

    let response = post_json(app, &uri, Some(MODERATOR_TOKEN), body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "resolved");
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn offer_with_non_positive_hours_is_rejected(pool: SqlitePool) {
    enroll_user(&pool, "u-member", None).await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/time-bank/offers",
        Some(MEMBER_TOKEN),
        json!({
            "category": "cooking", "description": "meal prep",
            "estimated_hours": 0.0, "availability": "evenings"
        }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn request_with_empty_category_is_rejected(pool: SqlitePool) {
    enroll_user(&pool, "u-member", None).await;
    let app = build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/time-bank/requests",
        Some(MEMBER_TOKEN),
        json!({
            "category": "", "description": "weeding",
            "estimated_hours": 1.0, "preferred_time": "weekends"
        }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_owner_kind_is_rejected(pool: SqlitePool) {
    enroll_user(&pool, "u-member", None).await;
    let app = build_test_app(pool);

    let response = get(
        app,
        "/api/v1/time-bank/balances/treasury/pool",
        Some(MEMBER_TOKEN),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

// ---------------------------------------------------------------------------
// Rate limiting
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn requests_over_the_limit_get_429(pool: SqlitePool) {
    enroll_user(&pool, "u-member", None).await;
    let app = build_test_app_with_limit(pool, 2);

    for _ in 0..2 {
        let response = get(app.clone(), "/api/v1/time-bank/me", Some(MEMBER_TOKEN)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get(app.clone(), "/api/v1/time-bank/me", Some(MEMBER_TOKEN)).await;
    assert_error(response, StatusCode::TOO_MANY_REQUESTS, "RATE_LIMITED").await;

    // Health sits outside the limited surface.
    let response = get(app, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// End-to-end flow
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn full_session_flow_over_http(pool: SqlitePool) {
    let helper = enroll_user(&pool, "u-member", None).await;
    let recipient = enroll_user(&pool, "u-moderator", Some("moderator")).await;
    let app = build_test_app(pool);

    // Profile surface.
    let response = get(app.clone(), "/api/v1/time-bank/me", Some(MEMBER_TOKEN)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["data"]["id"], helper.id.as_str());

    let response = patch_json(
        app.clone(),
        "/api/v1/time-bank/me",
        Some(MEMBER_TOKEN),
        json!({ "area": "harbor" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["area"], "harbor");

    // Schedule and complete a member-funded session.
    let response = post_json(
        app.clone(),
        "/api/v1/time-bank/help-sessions",
        Some(MEMBER_TOKEN),
        json!({
            "helper_member_id": helper.id.as_str(),
            "recipient_member_id": recipient.id.as_str(),
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let session = body_json(response).await;
    let session_id = session["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(session["data"]["status"], "scheduled");

    let complete_uri = format!("/api/v1/time-bank/help-sessions/{session_id}/complete");
    let complete_body = json!({ "agreed_hours": 1.5, "funding_source": "member" });

    let response = post_json(
        app.clone(),
        &complete_uri,
        Some(MEMBER_TOKEN),
        complete_body.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let completed = body_json(response).await;
    assert_eq!(completed["data"]["status"], "completed");
    assert_eq!(completed["data"]["agreed_hours"], 1.5);

    // Completing again conflicts.
    let response = post_json(app.clone(), &complete_uri, Some(MEMBER_TOKEN), complete_body).await;
    assert_error(response, StatusCode::CONFLICT, "CONFLICT").await;

    // Balances moved symmetrically.
    let uri = format!("/api/v1/time-bank/balances/member/{}", helper.id);
    let response = get(app.clone(), &uri, Some(MEMBER_TOKEN)).await;
    assert_eq!(body_json(response).await["data"]["hours"], 1.5);

    let uri = format!("/api/v1/time-bank/balances/member/{}", recipient.id);
    let response = get(app.clone(), &uri, Some(MEMBER_TOKEN)).await;
    assert_eq!(body_json(response).await["data"]["hours"], -1.5);

    // One ledger row, visible from either side.
    let uri = format!("/api/v1/time-bank/ledger/{}", helper.id);
    let response = get(app.clone(), &uri, Some(MEMBER_TOKEN)).await;
    let ledger = body_json(response).await;
    assert_eq!(ledger["data"].as_array().unwrap().len(), 1);
    assert_eq!(ledger["data"][0]["session_id"], session_id.as_str());

    // Both participants received the completion notification.
    let response = get(app.clone(), "/api/v1/notifications", Some(MEMBER_TOKEN)).await;
    let inbox = body_json(response).await;
    let events: Vec<_> = inbox["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["event_type"].as_str().unwrap().to_string())
        .collect();
    assert!(events.contains(&"session_completed".to_string()));
    assert!(events.contains(&"offer_accepted".to_string()));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn prefs_and_delivery_over_http(pool: SqlitePool) {
    enroll_user(&pool, "u-member", None).await;
    enroll_user(&pool, "u-admin", Some("admin")).await;
    let app = build_test_app(pool);

    // Flip one preference flag.
    let response = patch_json(
        app.clone(),
        "/api/v1/notifications/prefs",
        Some(MEMBER_TOKEN),
        json!({ "on_new_request": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let prefs = body_json(response).await;
    assert_eq!(prefs["data"]["on_new_request"], false);
    assert_eq!(prefs["data"]["channel_email"], true);

    // Post a request as admin; the muted member hears nothing.
    let response = post_json(
        app.clone(),
        "/api/v1/time-bank/requests",
        Some(ADMIN_TOKEN),
        json!({
            "category": "errands", "description": "pharmacy run",
            "estimated_hours": 1.0, "preferred_time": "weekday evenings"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app.clone(), "/api/v1/notifications", Some(MEMBER_TOKEN)).await;
    assert!(body_json(response).await["data"].as_array().unwrap().is_empty());

    // The admin notified themself; record a delivery for that row.
    let response = get(app.clone(), "/api/v1/notifications", Some(ADMIN_TOKEN)).await;
    let inbox = body_json(response).await;
    let notification_id = inbox["data"][0]["id"].as_str().unwrap().to_string();

    let deliver_body = json!({ "notification_id": notification_id, "outcome": "sent" });

    // Delivery callbacks are admin-only.
    let response = post_json(
        app.clone(),
        "/api/v1/notifications/deliver",
        Some(MEMBER_TOKEN),
        deliver_body.clone(),
    )
    .await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;

    let response = post_json(
        app.clone(),
        "/api/v1/notifications/deliver",
        Some(ADMIN_TOKEN),
        deliver_body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, "/api/v1/notifications", Some(ADMIN_TOKEN)).await;
    let inbox = body_json(response).await;
    assert_eq!(inbox["data"][0]["status"], "sent");
}
