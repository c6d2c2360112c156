//! Notification outbox and preference models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use timebank_core::types::{DbId, Timestamp};

/// A row from the `notifications` table: one pending delivery per
/// (event, recipient) pair. Status moves `pending -> {sent, failed}` at most
/// once; terminal rows are never rewritten.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub member_id: DbId,
    pub event_type: String,
    pub payload_json: String,
    pub status: String,
    pub failure_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `notification_prefs` table. One per member, all flags
/// defaulting to true at enrollment.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationPrefs {
    pub member_id: DbId,
    pub on_new_request: bool,
    pub on_offer_accepted: bool,
    pub on_session_completed: bool,
    pub channel_email: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Partial preference update; `None` fields retain their prior value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateNotificationPrefs {
    pub on_new_request: Option<bool>,
    pub on_offer_accepted: Option<bool>,
    pub on_session_completed: Option<bool>,
    pub channel_email: Option<bool>,
}
