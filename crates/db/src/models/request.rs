//! Help-request entity models.

use serde::Serialize;
use sqlx::FromRow;
use timebank_core::types::{DbId, Timestamp};

/// A row from the `requests` table. Immutable once created; creation is the
/// trigger for `new_help_request` notifications.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HelpRequest {
    pub id: DbId,
    pub member_id: DbId,
    pub category: String,
    pub description: String,
    pub estimated_hours: f64,
    pub preferred_time: String,
    pub created_at: Timestamp,
}

/// Input for posting a request for help.
#[derive(Debug, Clone)]
pub struct CreateHelpRequest {
    pub member_id: DbId,
    pub category: String,
    pub description: String,
    pub estimated_hours: f64,
    pub preferred_time: String,
}
