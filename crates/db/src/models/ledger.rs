//! Ledger entity model. Rows are append-only, one per completed session.

use serde::Serialize;
use sqlx::FromRow;
use timebank_core::types::{DbId, Timestamp};

/// A row from the `ledger_transactions` table.
///
/// `recipient_member_id` is null exactly when `funding_source = volunteer`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LedgerTransaction {
    pub id: DbId,
    pub helper_member_id: DbId,
    pub recipient_member_id: Option<DbId>,
    pub hours: f64,
    pub funding_source: String,
    pub session_id: DbId,
    pub created_at: Timestamp,
}
