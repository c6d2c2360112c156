//! Repository for the `members` table.

use sqlx::SqliteConnection;
use timebank_core::types::DbId;

use crate::models::member::Member;

/// Column list for `members` queries.
const COLUMNS: &str = "id, user_id, name, contact, area, created_at";

/// Provides CRUD operations for members.
pub struct MemberRepo;

impl MemberRepo {
    pub async fn insert(conn: &mut SqliteConnection, member: &Member) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO members (id, user_id, name, contact, area, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&member.id)
        .bind(&member.user_id)
        .bind(&member.name)
        .bind(&member.contact)
        .bind(&member.area)
        .bind(member.created_at)
        .execute(conn)
        .await?;
        Ok(())
    }

    pub async fn get(
        conn: &mut SqliteConnection,
        member_id: &str,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members WHERE id = ?1");
        sqlx::query_as::<_, Member>(&query)
            .bind(member_id)
            .fetch_optional(conn)
            .await
    }

    /// Look up the member linked to an account (the member-directory seam).
    pub async fn get_by_user_id(
        conn: &mut SqliteConnection,
        user_id: &str,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members WHERE user_id = ?1");
        sqlx::query_as::<_, Member>(&query)
            .bind(user_id)
            .fetch_optional(conn)
            .await
    }

    /// Overwrite the mutable profile fields (name, contact, area).
    pub async fn update_profile(
        conn: &mut SqliteConnection,
        member_id: &DbId,
        name: &str,
        contact: &str,
        area: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE members SET name = ?1, contact = ?2, area = ?3 WHERE id = ?4")
            .bind(name)
            .bind(contact)
            .bind(area)
            .bind(member_id)
            .execute(conn)
            .await?;
        Ok(())
    }
}
