//! Help-session entity models.

use serde::Serialize;
use sqlx::FromRow;
use timebank_core::types::{DbId, Timestamp};

/// A row from the `help_sessions` table.
///
/// `agreed_hours`, `funding_source` and `completed_at` are null while the
/// session is `scheduled` and all non-null once it is `completed`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HelpSession {
    pub id: DbId,
    pub helper_member_id: DbId,
    pub recipient_member_id: DbId,
    pub request_id: Option<DbId>,
    pub offer_id: Option<DbId>,
    pub status: String,
    pub agreed_hours: Option<f64>,
    pub funding_source: Option<String>,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

/// Input for scheduling a session.
#[derive(Debug, Clone)]
pub struct CreateHelpSession {
    pub helper_member_id: DbId,
    pub recipient_member_id: DbId,
    pub request_id: Option<DbId>,
    pub offer_id: Option<DbId>,
}
