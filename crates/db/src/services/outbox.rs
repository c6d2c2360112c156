//! Notification outbox: preference-gated enqueueing, the prefs-blind
//! moderator alert path, preference management, and delivery bookkeeping.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;
use timebank_core::error::CoreError;
use timebank_core::events::{DeliveryOutcome, EventType, NotificationEvent, NotificationStatus};
use timebank_core::types::new_id;

use crate::models::notification::{Notification, NotificationPrefs, UpdateNotificationPrefs};
use crate::repositories::{NotificationPrefRepo, NotificationRepo, RoleRepo};
use crate::services::ServiceResult;
use crate::DbPool;

/// Reason recorded when a failed delivery reports none.
const DEFAULT_FAILURE_REASON: &str = "unknown";

fn pending_row(member_id: &str, event: &NotificationEvent, now: DateTime<Utc>) -> Notification {
    Notification {
        id: new_id(),
        member_id: member_id.to_string(),
        event_type: event.event_type().as_str().to_string(),
        payload_json: event.payload().to_string(),
        status: NotificationStatus::Pending.as_str().to_string(),
        failure_reason: None,
        created_at: now,
        updated_at: now,
    }
}

/// Which preference flag gates a personally-delivered event.
///
/// `report_created` never passes through here; moderation alerts use
/// [`enqueue_for_moderators`], which does not consult preferences.
fn pref_gate(prefs: &NotificationPrefs, event_type: EventType) -> bool {
    let flag = match event_type {
        EventType::NewHelpRequest => prefs.on_new_request,
        EventType::OfferAccepted => prefs.on_offer_accepted,
        EventType::SessionCompleted => prefs.on_session_completed,
        EventType::ReportCreated => return false,
    };
    flag && prefs.channel_email
}

/// Enqueue `event` for each candidate whose event flag and email-channel
/// flag are both set. Duplicate candidates produce one row.
pub(crate) async fn enqueue_gated(
    conn: &mut SqliteConnection,
    event: &NotificationEvent,
    candidates: &[&str],
    now: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    let mut seen: Vec<&str> = Vec::with_capacity(candidates.len());
    for &member_id in candidates {
        if seen.contains(&member_id) {
            continue;
        }
        seen.push(member_id);

        let Some(prefs) = NotificationPrefRepo::get(conn, member_id).await? else {
            continue;
        };
        if pref_gate(&prefs, event.event_type()) {
            NotificationRepo::insert(conn, &pending_row(member_id, event, now)).await?;
        }
    }
    Ok(())
}

/// Broadcast a `new_help_request` event to every eligible member.
pub(crate) async fn enqueue_new_request_broadcast(
    conn: &mut SqliteConnection,
    event: &NotificationEvent,
    now: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    let audience = NotificationPrefRepo::new_request_audience(conn).await?;
    for member_id in &audience {
        NotificationRepo::insert(conn, &pending_row(member_id, event, now)).await?;
    }
    Ok(())
}

/// Alert every moderator/admin member. Role-based alerts bypass personal
/// preferences: this path never reads `notification_prefs`.
pub(crate) async fn enqueue_for_moderators(
    conn: &mut SqliteConnection,
    event: &NotificationEvent,
    now: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    let moderators = RoleRepo::moderation_member_ids(conn).await?;
    for member_id in &moderators {
        NotificationRepo::insert(conn, &pending_row(member_id, event, now)).await?;
    }
    Ok(())
}

/// Fetch a member's notification preferences.
pub async fn get_prefs(pool: &DbPool, member_id: &str) -> ServiceResult<NotificationPrefs> {
    let mut conn = pool.acquire().await?;
    NotificationPrefRepo::get(&mut conn, member_id)
        .await?
        .ok_or_else(|| CoreError::not_found("NotificationPrefs", member_id).into())
}

/// Partially update a member's preferences; unspecified flags keep their
/// prior value.
pub async fn update_prefs(
    pool: &DbPool,
    member_id: &str,
    update: UpdateNotificationPrefs,
) -> ServiceResult<NotificationPrefs> {
    let mut tx = pool.begin().await?;

    let current = NotificationPrefRepo::get(&mut tx, member_id)
        .await?
        .ok_or_else(|| CoreError::not_found("NotificationPrefs", member_id))?;

    let now = Utc::now();
    let on_new_request = update.on_new_request.unwrap_or(current.on_new_request);
    let on_offer_accepted = update.on_offer_accepted.unwrap_or(current.on_offer_accepted);
    let on_session_completed = update
        .on_session_completed
        .unwrap_or(current.on_session_completed);
    let channel_email = update.channel_email.unwrap_or(current.channel_email);

    NotificationPrefRepo::update_flags(
        &mut tx,
        member_id,
        on_new_request,
        on_offer_accepted,
        on_session_completed,
        channel_email,
        now,
    )
    .await?;

    tx.commit().await?;

    Ok(NotificationPrefs {
        on_new_request,
        on_offer_accepted,
        on_session_completed,
        channel_email,
        updated_at: now,
        ..current
    })
}

/// List a member's queued notifications, newest first.
pub async fn list_for_member(pool: &DbPool, member_id: &str) -> ServiceResult<Vec<Notification>> {
    let mut conn = pool.acquire().await?;
    Ok(NotificationRepo::list_for_member(&mut conn, member_id).await?)
}

/// Record the outcome of a delivery attempt.
///
/// Unknown ids are an error. A notification already in a terminal status is
/// left untouched: the call is accepted but is a strict no-op, so retry
/// storms cannot rewrite history. A failure with no reason is recorded as
/// `"unknown"`.
pub async fn record_delivery_attempt(
    pool: &DbPool,
    notification_id: &str,
    outcome: DeliveryOutcome,
    failure_reason: Option<String>,
) -> ServiceResult<()> {
    let mut tx = pool.begin().await?;

    let notification = NotificationRepo::get(&mut tx, notification_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Notification", notification_id))?;

    let current: NotificationStatus = notification.status.parse()?;
    if current.is_terminal() {
        tracing::debug!(notification_id, status = %current.as_str(), "delivery already recorded, ignoring");
        return Ok(());
    }

    let status = outcome.as_status();
    let reason = match outcome {
        DeliveryOutcome::Failed => {
            Some(failure_reason.unwrap_or_else(|| DEFAULT_FAILURE_REASON.to_string()))
        }
        DeliveryOutcome::Sent => None,
    };

    NotificationRepo::set_delivery(
        &mut tx,
        notification_id,
        status,
        reason.as_deref(),
        Utc::now(),
    )
    .await?;

    tx.commit().await?;

    tracing::debug!(notification_id, status = %status.as_str(), "delivery attempt recorded");
    Ok(())
}
