//! Offer, request, session, balance, and ledger handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use timebank_core::ledger::{FundingSource, OwnerKind};
use timebank_db::models::offer::CreateOffer;
use timebank_db::models::request::CreateHelpRequest;
use timebank_db::models::session::CreateHelpSession;
use timebank_db::services::{members, time_bank};
use validator::Validate;

use super::validate_body;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOfferRequest {
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    #[validate(range(exclusive_min = 0.0, message = "estimated_hours must be positive"))]
    pub estimated_hours: f64,
    #[validate(length(min = 1, message = "availability must not be empty"))]
    pub availability: String,
}

/// `POST /time-bank/offers` -- post an offer of help on the caller's behalf.
pub async fn create_offer(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateOfferRequest>,
) -> AppResult<Json<serde_json::Value>> {
    validate_body(&body)?;

    let member = members::get_by_user(&state.pool, &auth.user_id).await?;
    let offer = time_bank::create_offer(
        &state.pool,
        CreateOffer {
            member_id: member.id,
            category: body.category,
            description: body.description,
            estimated_hours: body.estimated_hours,
            availability: body.availability,
        },
    )
    .await?;

    Ok(Json(json!({ "data": offer })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRequestRequest {
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: String,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    #[validate(range(exclusive_min = 0.0, message = "estimated_hours must be positive"))]
    pub estimated_hours: f64,
    #[validate(length(min = 1, message = "preferred_time must not be empty"))]
    pub preferred_time: String,
}

/// `POST /time-bank/requests` -- post a request for help and broadcast it.
pub async fn create_request(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateRequestRequest>,
) -> AppResult<Json<serde_json::Value>> {
    validate_body(&body)?;

    let member = members::get_by_user(&state.pool, &auth.user_id).await?;
    let request = time_bank::create_request(
        &state.pool,
        CreateHelpRequest {
            member_id: member.id,
            category: body.category,
            description: body.description,
            estimated_hours: body.estimated_hours,
            preferred_time: body.preferred_time,
        },
    )
    .await?;

    Ok(Json(json!({ "data": request })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSessionRequest {
    #[validate(length(min = 1, message = "helper_member_id must not be empty"))]
    pub helper_member_id: String,
    #[validate(length(min = 1, message = "recipient_member_id must not be empty"))]
    pub recipient_member_id: String,
    pub request_id: Option<String>,
    pub offer_id: Option<String>,
}

/// `POST /time-bank/help-sessions` -- schedule a session between two members.
pub async fn create_session(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(body): Json<CreateSessionRequest>,
) -> AppResult<Json<serde_json::Value>> {
    validate_body(&body)?;

    let session = time_bank::create_help_session(
        &state.pool,
        CreateHelpSession {
            helper_member_id: body.helper_member_id,
            recipient_member_id: body.recipient_member_id,
            request_id: body.request_id,
            offer_id: body.offer_id,
        },
    )
    .await?;

    Ok(Json(json!({ "data": session })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CompleteSessionRequest {
    #[validate(range(exclusive_min = 0.0, message = "agreed_hours must be positive"))]
    pub agreed_hours: f64,
    pub funding_source: FundingSource,
}

/// `POST /time-bank/help-sessions/{id}/complete` -- settle the session's
/// hours. Completing twice returns 409.
pub async fn complete_session(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(body): Json<CompleteSessionRequest>,
) -> AppResult<Json<serde_json::Value>> {
    validate_body(&body)?;

    let session = time_bank::complete_help_session(
        &state.pool,
        &session_id,
        body.agreed_hours,
        body.funding_source,
    )
    .await?;

    Ok(Json(json!({ "data": session })))
}

/// `GET /time-bank/balances/{owner_kind}/{owner_id}` -- current balance;
/// owners without a row read as zero.
pub async fn get_balance(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path((owner_kind, owner_id)): Path<(String, String)>,
) -> AppResult<Json<serde_json::Value>> {
    let kind: OwnerKind = owner_kind.parse()?;
    let hours = time_bank::balance(&state.pool, kind, &owner_id).await?;

    Ok(Json(json!({ "data": {
        "owner_kind": kind,
        "owner_id": owner_id,
        "hours": hours,
    }})))
}

/// `GET /time-bank/ledger/{member_id}` -- the member's ledger entries,
/// newest first.
pub async fn get_ledger(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let entries = time_bank::member_ledger(&state.pool, &member_id).await?;
    Ok(Json(json!({ "data": entries })))
}
