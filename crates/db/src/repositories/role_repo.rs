//! Repository for the `user_roles` table.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;
use timebank_core::roles::{ROLE_ADMIN, ROLE_MODERATOR};
use timebank_core::types::DbId;

/// Provides role lookups keyed by user id.
pub struct RoleRepo;

impl RoleRepo {
    pub async fn insert(
        conn: &mut SqliteConnection,
        user_id: &str,
        role: &str,
        created_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO user_roles (user_id, role, created_at) VALUES (?1, ?2, ?3)")
            .bind(user_id)
            .bind(role)
            .bind(created_at)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Member ids of everyone whose linked user holds a moderation role.
    /// Feeds the prefs-blind `report_created` alert path.
    pub async fn moderation_member_ids(
        conn: &mut SqliteConnection,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT m.id FROM members m \
             JOIN user_roles ur ON ur.user_id = m.user_id \
             WHERE ur.role IN (?1, ?2)",
        )
        .bind(ROLE_MODERATOR)
        .bind(ROLE_ADMIN)
        .fetch_all(conn)
        .await
    }
}
