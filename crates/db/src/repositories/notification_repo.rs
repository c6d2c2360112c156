//! Repository for the `notifications` table.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;
use timebank_core::events::NotificationStatus;

use crate::models::notification::Notification;

/// Column list for `notifications` queries.
const COLUMNS: &str =
    "id, member_id, event_type, payload_json, status, failure_reason, created_at, updated_at";

/// Provides CRUD operations for queued notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    pub async fn insert(
        conn: &mut SqliteConnection,
        notification: &Notification,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO notifications \
             (id, member_id, event_type, payload_json, status, failure_reason, \
              created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )
        .bind(&notification.id)
        .bind(&notification.member_id)
        .bind(&notification.event_type)
        .bind(&notification.payload_json)
        .bind(&notification.status)
        .bind(&notification.failure_reason)
        .bind(notification.created_at)
        .bind(notification.updated_at)
        .execute(conn)
        .await?;
        Ok(())
    }

    pub async fn get(
        conn: &mut SqliteConnection,
        notification_id: &str,
    ) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications WHERE id = ?1");
        sqlx::query_as::<_, Notification>(&query)
            .bind(notification_id)
            .fetch_optional(conn)
            .await
    }

    /// All notifications queued for a member, newest first.
    pub async fn list_for_member(
        conn: &mut SqliteConnection,
        member_id: &str,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE member_id = ?1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(member_id)
            .fetch_all(conn)
            .await
    }

    /// Record the outcome of a delivery attempt. The terminal-state no-op
    /// check belongs to the service layer; this just writes.
    pub async fn set_delivery(
        conn: &mut SqliteConnection,
        notification_id: &str,
        status: NotificationStatus,
        failure_reason: Option<&str>,
        updated_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE notifications \
             SET status = ?1, failure_reason = ?2, updated_at = ?3 \
             WHERE id = ?4",
        )
        .bind(status.as_str())
        .bind(failure_reason)
        .bind(updated_at)
        .bind(notification_id)
        .execute(conn)
        .await?;
        Ok(())
    }
}
