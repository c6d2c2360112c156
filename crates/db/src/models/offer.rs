//! Offer entity models.

use serde::Serialize;
use sqlx::FromRow;
use timebank_core::types::{DbId, Timestamp};

/// A row from the `offers` table. Immutable once created.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Offer {
    pub id: DbId,
    pub member_id: DbId,
    pub category: String,
    pub description: String,
    pub estimated_hours: f64,
    pub availability: String,
    pub created_at: Timestamp,
}

/// Input for posting an offer of help.
#[derive(Debug, Clone)]
pub struct CreateOffer {
    pub member_id: DbId,
    pub category: String,
    pub description: String,
    pub estimated_hours: f64,
    pub availability: String,
}
