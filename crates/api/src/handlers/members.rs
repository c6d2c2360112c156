//! Member enrollment and profile handlers.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use timebank_db::models::member::{CreateMember, UpdateMemberProfile};
use timebank_db::services::members;
use validator::Validate;

use super::validate_body;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct EnrollMemberRequest {
    #[validate(length(min = 1, message = "user_id must not be empty"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "contact must not be empty"))]
    pub contact: String,
    #[validate(length(min = 1, message = "area must not be empty"))]
    pub area: String,
    pub role: Option<String>,
}

/// `POST /time-bank/members` -- operator enrollment, admin only.
pub async fn enroll_member(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<EnrollMemberRequest>,
) -> AppResult<Json<serde_json::Value>> {
    validate_body(&body)?;

    let member = members::enroll(
        &state.pool,
        CreateMember {
            user_id: body.user_id,
            name: body.name,
            contact: body.contact,
            area: body.area,
            role: body.role,
        },
    )
    .await?;

    tracing::info!(member_id = %member.id, enrolled_by = %admin.user_id, "member enrolled");
    Ok(Json(json!({ "data": member })))
}

/// `GET /time-bank/me` -- the caller's member profile.
pub async fn get_me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<serde_json::Value>> {
    let member = members::get_by_user(&state.pool, &auth.user_id).await?;
    Ok(Json(json!({ "data": member })))
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "contact must not be empty"))]
    pub contact: Option<String>,
    #[validate(length(min = 1, message = "area must not be empty"))]
    pub area: Option<String>,
}

/// `PATCH /time-bank/me` -- partial profile update for the caller.
pub async fn update_me(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<UpdateProfileRequest>,
) -> AppResult<Json<serde_json::Value>> {
    validate_body(&body)?;

    let member = members::get_by_user(&state.pool, &auth.user_id).await?;
    let updated = members::update_profile(
        &state.pool,
        &member.id,
        UpdateMemberProfile {
            name: body.name,
            contact: body.contact,
            area: body.area,
        },
    )
    .await?;

    Ok(Json(json!({ "data": updated })))
}
