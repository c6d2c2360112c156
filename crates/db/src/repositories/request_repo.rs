//! Repository for the `requests` table.

use sqlx::SqliteConnection;

use crate::models::request::HelpRequest;

/// Column list for `requests` queries.
const COLUMNS: &str =
    "id, member_id, category, description, estimated_hours, preferred_time, created_at";

/// Provides CRUD operations for help requests.
pub struct RequestRepo;

impl RequestRepo {
    pub async fn insert(
        conn: &mut SqliteConnection,
        request: &HelpRequest,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO requests \
             (id, member_id, category, description, estimated_hours, preferred_time, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&request.id)
        .bind(&request.member_id)
        .bind(&request.category)
        .bind(&request.description)
        .bind(request.estimated_hours)
        .bind(&request.preferred_time)
        .bind(request.created_at)
        .execute(conn)
        .await?;
        Ok(())
    }

    pub async fn get(
        conn: &mut SqliteConnection,
        request_id: &str,
    ) -> Result<Option<HelpRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM requests WHERE id = ?1");
        sqlx::query_as::<_, HelpRequest>(&query)
            .bind(request_id)
            .fetch_optional(conn)
            .await
    }
}
