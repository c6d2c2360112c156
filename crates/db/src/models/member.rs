//! Member entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use timebank_core::types::{DbId, Timestamp};

/// A row from the `members` table. One member per account; never deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Member {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub contact: String,
    pub area: String,
    pub created_at: Timestamp,
}

/// Input for enrolling a member.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMember {
    pub user_id: DbId,
    pub name: String,
    pub contact: String,
    pub area: String,
    /// Role recorded for the linked user. Defaults to `member`.
    pub role: Option<String>,
}

/// Partial profile update; `None` fields retain their prior value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMemberProfile {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub area: Option<String>,
}
