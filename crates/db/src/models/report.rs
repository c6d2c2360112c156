//! Abuse-report entity models.

use serde::Serialize;
use sqlx::FromRow;
use timebank_core::types::{DbId, Timestamp};

/// A row from the `reports` table. `open -> resolved` is one-way.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Report {
    pub id: DbId,
    pub reporter_member_id: DbId,
    pub reported_member_id: Option<DbId>,
    pub session_id: Option<DbId>,
    pub reason: String,
    pub status: String,
    pub resolution_action: Option<String>,
    pub created_at: Timestamp,
    pub resolved_at: Option<Timestamp>,
}

/// Input for filing a report.
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub reporter_member_id: DbId,
    pub reported_member_id: Option<DbId>,
    pub session_id: Option<DbId>,
    pub reason: String,
}
