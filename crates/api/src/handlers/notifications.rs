//! Notification listing, preference, and delivery-callback handlers.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use timebank_core::events::DeliveryOutcome;
use timebank_db::models::notification::UpdateNotificationPrefs;
use timebank_db::services::{members, outbox};
use validator::Validate;

use super::validate_body;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// `GET /notifications` -- the caller's queued notifications, newest first.
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let member = members::get_by_user(&state.pool, &auth.user_id).await?;
    let notifications = outbox::list_for_member(&state.pool, &member.id).await?;
    Ok(Json(json!({ "data": notifications })))
}

/// `GET /notifications/prefs` -- the caller's notification preferences.
pub async fn get_prefs(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let member = members::get_by_user(&state.pool, &auth.user_id).await?;
    let prefs = outbox::get_prefs(&state.pool, &member.id).await?;
    Ok(Json(json!({ "data": prefs })))
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePrefsRequest {
    pub on_new_request: Option<bool>,
    pub on_offer_accepted: Option<bool>,
    pub on_session_completed: Option<bool>,
    pub channel_email: Option<bool>,
}

/// `PATCH /notifications/prefs` -- partial preference update for the caller.
pub async fn update_prefs(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<UpdatePrefsRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let member = members::get_by_user(&state.pool, &auth.user_id).await?;
    let prefs = outbox::update_prefs(
        &state.pool,
        &member.id,
        UpdateNotificationPrefs {
            on_new_request: body.on_new_request,
            on_offer_accepted: body.on_offer_accepted,
            on_session_completed: body.on_session_completed,
            channel_email: body.channel_email,
        },
    )
    .await?;

    Ok(Json(json!({ "data": prefs })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct RecordDeliveryRequest {
    #[validate(length(min = 1, message = "notification_id must not be empty"))]
    pub notification_id: String,
    pub outcome: DeliveryOutcome,
    pub failure_reason: Option<String>,
}

/// `POST /notifications/deliver` -- delivery-worker callback, admin token
/// only. Re-reporting a terminal notification is accepted and ignored.
pub async fn record_delivery(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<RecordDeliveryRequest>,
) -> AppResult<Json<serde_json::Value>> {
    validate_body(&body)?;

    outbox::record_delivery_attempt(
        &state.pool,
        &body.notification_id,
        body.outcome,
        body.failure_reason,
    )
    .await?;

    Ok(Json(json!({ "data": { "recorded": true } })))
}
