//! Abuse-report handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use timebank_db::models::report::CreateReport;
use timebank_db::services::{members, moderation};
use validator::Validate;

use super::validate_body;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireModerator;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReportRequest {
    pub reported_member_id: Option<String>,
    pub session_id: Option<String>,
    #[validate(length(min = 1, message = "reason must not be empty"))]
    pub reason: String,
}

/// `POST /time-bank/reports` -- file a report as the caller. Moderators are
/// alerted regardless of their notification preferences.
pub async fn create_report(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateReportRequest>,
) -> AppResult<Json<serde_json::Value>> {
    validate_body(&body)?;

    let member = members::get_by_user(&state.pool, &auth.user_id).await?;
    let report = moderation::create_report(
        &state.pool,
        CreateReport {
            reporter_member_id: member.id,
            reported_member_id: body.reported_member_id,
            session_id: body.session_id,
            reason: body.reason,
        },
    )
    .await?;

    Ok(Json(json!({ "data": report })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResolveReportRequest {
    #[validate(length(min = 1, message = "resolution_action must not be empty"))]
    pub resolution_action: String,
}

/// `POST /time-bank/reports/{id}/resolve` -- moderator/admin only.
pub async fn resolve_report(
    RequireModerator(moderator): RequireModerator,
    State(state): State<AppState>,
    Path(report_id): Path<String>,
    Json(body): Json<ResolveReportRequest>,
) -> AppResult<Json<serde_json::Value>> {
    validate_body(&body)?;

    let report =
        moderation::resolve_report(&state.pool, &report_id, &body.resolution_action).await?;

    tracing::info!(report_id = %report.id, resolved_by = %moderator.user_id, "report resolved");
    Ok(Json(json!({ "data": report })))
}
