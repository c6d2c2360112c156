//! Repository for the `notification_prefs` table.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;
use timebank_core::types::DbId;

use crate::models::notification::NotificationPrefs;

/// Column list for `notification_prefs` queries.
const COLUMNS: &str = "member_id, on_new_request, on_offer_accepted, on_session_completed, \
                       channel_email, created_at, updated_at";

/// Provides CRUD operations for per-member notification preferences.
pub struct NotificationPrefRepo;

impl NotificationPrefRepo {
    /// Insert the enrollment defaults: every flag true.
    pub async fn insert_defaults(
        conn: &mut SqliteConnection,
        member_id: &str,
        created_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO notification_prefs \
             (member_id, on_new_request, on_offer_accepted, on_session_completed, \
              channel_email, created_at, updated_at) \
             VALUES (?1, 1, 1, 1, 1, ?2, ?2)",
        )
        .bind(member_id)
        .bind(created_at)
        .execute(conn)
        .await?;
        Ok(())
    }

    pub async fn get(
        conn: &mut SqliteConnection,
        member_id: &str,
    ) -> Result<Option<NotificationPrefs>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notification_prefs WHERE member_id = ?1");
        sqlx::query_as::<_, NotificationPrefs>(&query)
            .bind(member_id)
            .fetch_optional(conn)
            .await
    }

    /// Overwrite all four flags.
    pub async fn update_flags(
        conn: &mut SqliteConnection,
        member_id: &str,
        on_new_request: bool,
        on_offer_accepted: bool,
        on_session_completed: bool,
        channel_email: bool,
        updated_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE notification_prefs \
             SET on_new_request = ?1, on_offer_accepted = ?2, on_session_completed = ?3, \
                 channel_email = ?4, updated_at = ?5 \
             WHERE member_id = ?6",
        )
        .bind(on_new_request)
        .bind(on_offer_accepted)
        .bind(on_session_completed)
        .bind(channel_email)
        .bind(updated_at)
        .bind(member_id)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Members eligible for the `new_help_request` broadcast: the event flag
    /// and the email channel flag both set.
    pub async fn new_request_audience(
        conn: &mut SqliteConnection,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT member_id FROM notification_prefs \
             WHERE on_new_request = 1 AND channel_email = 1",
        )
        .fetch_all(conn)
        .await
    }
}
