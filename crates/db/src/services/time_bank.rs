//! Help-session lifecycle, offers/requests, ledger and balance reads.
//!
//! Completion is the only operation that moves hours. It reads balances,
//! applies the settlement plan, appends the ledger row, flips the session to
//! `completed`, and enqueues notifications -- all inside one transaction, or
//! not at all.

use chrono::Utc;
use timebank_core::error::CoreError;
use timebank_core::ledger::{
    settle, validate_hours, FundingSource, OwnerKind, SessionStatus,
};
use timebank_core::events::NotificationEvent;
use timebank_core::types::new_id;

use crate::models::ledger::LedgerTransaction;
use crate::models::offer::{CreateOffer, Offer};
use crate::models::request::{CreateHelpRequest, HelpRequest};
use crate::models::session::{CreateHelpSession, HelpSession};
use crate::repositories::{
    BalanceRepo, LedgerRepo, MemberRepo, OfferRepo, RequestRepo, SessionRepo,
};
use crate::services::{outbox, ServiceResult};
use crate::DbPool;

/// Post an offer of help. Offers are immutable once created and trigger no
/// notifications.
pub async fn create_offer(pool: &DbPool, input: CreateOffer) -> ServiceResult<Offer> {
    validate_hours(input.estimated_hours)?;

    let mut tx = pool.begin().await?;

    let offer = Offer {
        id: new_id(),
        member_id: input.member_id,
        category: input.category,
        description: input.description,
        estimated_hours: input.estimated_hours,
        availability: input.availability,
        created_at: Utc::now(),
    };
    OfferRepo::insert(&mut tx, &offer).await?;

    tx.commit().await?;
    Ok(offer)
}

/// Post a request for help and broadcast `new_help_request` to every member
/// whose preferences allow it, in the same transaction.
pub async fn create_request(pool: &DbPool, input: CreateHelpRequest) -> ServiceResult<HelpRequest> {
    validate_hours(input.estimated_hours)?;

    let mut tx = pool.begin().await?;

    let now = Utc::now();
    let request = HelpRequest {
        id: new_id(),
        member_id: input.member_id,
        category: input.category,
        description: input.description,
        estimated_hours: input.estimated_hours,
        preferred_time: input.preferred_time,
        created_at: now,
    };
    RequestRepo::insert(&mut tx, &request).await?;

    let event = NotificationEvent::NewHelpRequest {
        request_id: request.id.clone(),
        category: request.category.clone(),
    };
    outbox::enqueue_new_request_broadcast(&mut tx, &event, now).await?;

    tx.commit().await?;
    Ok(request)
}

/// Schedule a help session between two members and notify both participants
/// (`offer_accepted`), each gated by their own preferences. Linked request
/// and offer ids must exist when given.
pub async fn create_help_session(
    pool: &DbPool,
    input: CreateHelpSession,
) -> ServiceResult<HelpSession> {
    let mut tx = pool.begin().await?;

    for member_id in [&input.helper_member_id, &input.recipient_member_id] {
        if MemberRepo::get(&mut tx, member_id).await?.is_none() {
            return Err(CoreError::not_found("Member", member_id.clone()).into());
        }
    }
    if let Some(request_id) = &input.request_id {
        if RequestRepo::get(&mut tx, request_id).await?.is_none() {
            return Err(CoreError::not_found("HelpRequest", request_id.clone()).into());
        }
    }
    if let Some(offer_id) = &input.offer_id {
        if OfferRepo::get(&mut tx, offer_id).await?.is_none() {
            return Err(CoreError::not_found("Offer", offer_id.clone()).into());
        }
    }

    let now = Utc::now();
    let session = HelpSession {
        id: new_id(),
        helper_member_id: input.helper_member_id,
        recipient_member_id: input.recipient_member_id,
        request_id: input.request_id,
        offer_id: input.offer_id,
        status: SessionStatus::Scheduled.as_str().to_string(),
        agreed_hours: None,
        funding_source: None,
        created_at: now,
        completed_at: None,
    };
    SessionRepo::insert(&mut tx, &session).await?;

    let event = NotificationEvent::OfferAccepted {
        session_id: session.id.clone(),
    };
    outbox::enqueue_gated(
        &mut tx,
        &event,
        &[&session.helper_member_id, &session.recipient_member_id],
        now,
    )
    .await?;

    tx.commit().await?;

    tracing::info!(session_id = %session.id, "help session scheduled");
    Ok(session)
}

/// Complete a scheduled session and settle its hours.
///
/// Fails with `NotFound` for an unknown session and `Conflict` for one that
/// is no longer `scheduled` -- completion happens at most once, so exactly
/// one ledger row ever exists per session.
pub async fn complete_help_session(
    pool: &DbPool,
    session_id: &str,
    agreed_hours: f64,
    funding_source: FundingSource,
) -> ServiceResult<HelpSession> {
    let mut tx = pool.begin().await?;

    let session = SessionRepo::get(&mut tx, session_id)
        .await?
        .ok_or_else(|| CoreError::not_found("HelpSession", session_id))?;

    if session.status != SessionStatus::Scheduled.as_str() {
        return Err(CoreError::Conflict(format!(
            "session {session_id} is already {}",
            session.status
        ))
        .into());
    }

    let plan = settle(
        funding_source,
        &session.helper_member_id,
        &session.recipient_member_id,
        agreed_hours,
    )?;

    let now = Utc::now();

    // Balance read-modify-write and the ledger append share this transaction.
    for adjustment in &plan.adjustments {
        let current =
            BalanceRepo::get(&mut tx, adjustment.owner_kind, &adjustment.owner_id).await?;
        BalanceRepo::set(
            &mut tx,
            adjustment.owner_kind,
            &adjustment.owner_id,
            current + adjustment.delta,
            now,
        )
        .await?;
    }

    let entry = LedgerTransaction {
        id: new_id(),
        helper_member_id: session.helper_member_id.clone(),
        recipient_member_id: plan.ledger_recipient.clone(),
        hours: agreed_hours,
        funding_source: funding_source.as_str().to_string(),
        session_id: session.id.clone(),
        created_at: now,
    };
    LedgerRepo::insert(&mut tx, &entry).await?;

    SessionRepo::mark_completed(&mut tx, &session.id, agreed_hours, funding_source, now).await?;

    if plan.notify_participants {
        let event = NotificationEvent::SessionCompleted {
            session_id: session.id.clone(),
            agreed_hours,
            funding_source,
        };
        outbox::enqueue_gated(
            &mut tx,
            &event,
            &[&session.helper_member_id, &session.recipient_member_id],
            now,
        )
        .await?;
    }

    tx.commit().await?;

    tracing::info!(
        session_id = %session.id,
        hours = agreed_hours,
        funding = %funding_source,
        "help session completed"
    );

    Ok(HelpSession {
        status: SessionStatus::Completed.as_str().to_string(),
        agreed_hours: Some(agreed_hours),
        funding_source: Some(funding_source.as_str().to_string()),
        completed_at: Some(now),
        ..session
    })
}

/// Ledger entries where the member is helper or recipient, newest first.
pub async fn member_ledger(pool: &DbPool, member_id: &str) -> ServiceResult<Vec<LedgerTransaction>> {
    let mut conn = pool.acquire().await?;
    Ok(LedgerRepo::list_for_member(&mut conn, member_id).await?)
}

/// Current balance for an owner; absent rows read as zero.
pub async fn balance(pool: &DbPool, owner_kind: OwnerKind, owner_id: &str) -> ServiceResult<f64> {
    let mut conn = pool.acquire().await?;
    Ok(BalanceRepo::get(&mut conn, owner_kind, owner_id).await?)
}
