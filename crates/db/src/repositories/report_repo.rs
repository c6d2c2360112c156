//! Repository for the `reports` table.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use crate::models::report::Report;

/// Column list for `reports` queries.
const COLUMNS: &str = "id, reporter_member_id, reported_member_id, session_id, reason, \
                       status, resolution_action, created_at, resolved_at";

/// Provides CRUD operations for abuse reports.
pub struct ReportRepo;

impl ReportRepo {
    pub async fn insert(conn: &mut SqliteConnection, report: &Report) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO reports \
             (id, reporter_member_id, reported_member_id, session_id, reason, \
              status, resolution_action, created_at, resolved_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(&report.id)
        .bind(&report.reporter_member_id)
        .bind(&report.reported_member_id)
        .bind(&report.session_id)
        .bind(&report.reason)
        .bind(&report.status)
        .bind(&report.resolution_action)
        .bind(report.created_at)
        .bind(report.resolved_at)
        .execute(conn)
        .await?;
        Ok(())
    }

    pub async fn get(
        conn: &mut SqliteConnection,
        report_id: &str,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE id = ?1");
        sqlx::query_as::<_, Report>(&query)
            .bind(report_id)
            .fetch_optional(conn)
            .await
    }

    /// One-way transition to `resolved`, recording the action taken.
    pub async fn mark_resolved(
        conn: &mut SqliteConnection,
        report_id: &str,
        resolution_action: &str,
        resolved_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE reports \
             SET status = 'resolved', resolution_action = ?1, resolved_at = ?2 \
             WHERE id = ?3",
        )
        .bind(resolution_action)
        .bind(resolved_at)
        .bind(report_id)
        .execute(conn)
        .await?;
        Ok(())
    }
}
