//! Repository for the `help_sessions` table.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;
use timebank_core::ledger::{FundingSource, SessionStatus};

use crate::models::session::HelpSession;

/// Column list for `help_sessions` queries.
const COLUMNS: &str = "id, helper_member_id, recipient_member_id, request_id, offer_id, \
                       status, agreed_hours, funding_source, created_at, completed_at";

/// Provides CRUD operations for help sessions.
pub struct SessionRepo;

impl SessionRepo {
    pub async fn insert(
        conn: &mut SqliteConnection,
        session: &HelpSession,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO help_sessions \
             (id, helper_member_id, recipient_member_id, request_id, offer_id, \
              status, agreed_hours, funding_source, created_at, completed_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(&session.id)
        .bind(&session.helper_member_id)
        .bind(&session.recipient_member_id)
        .bind(&session.request_id)
        .bind(&session.offer_id)
        .bind(&session.status)
        .bind(session.agreed_hours)
        .bind(&session.funding_source)
        .bind(session.created_at)
        .bind(session.completed_at)
        .execute(conn)
        .await?;
        Ok(())
    }

    pub async fn get(
        conn: &mut SqliteConnection,
        session_id: &str,
    ) -> Result<Option<HelpSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM help_sessions WHERE id = ?1");
        sqlx::query_as::<_, HelpSession>(&query)
            .bind(session_id)
            .fetch_optional(conn)
            .await
    }

    /// One-way transition to `completed`, recording the agreed terms.
    pub async fn mark_completed(
        conn: &mut SqliteConnection,
        session_id: &str,
        agreed_hours: f64,
        funding_source: FundingSource,
        completed_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE help_sessions \
             SET status = ?1, agreed_hours = ?2, funding_source = ?3, completed_at = ?4 \
             WHERE id = ?5",
        )
        .bind(SessionStatus::Completed.as_str())
        .bind(agreed_hours)
        .bind(funding_source.as_str())
        .bind(completed_at)
        .bind(session_id)
        .execute(conn)
        .await?;
        Ok(())
    }
}
