//! Repository for the `offers` table.

use sqlx::SqliteConnection;

use crate::models::offer::Offer;

/// Column list for `offers` queries.
const COLUMNS: &str =
    "id, member_id, category, description, estimated_hours, availability, created_at";

/// Provides CRUD operations for help offers.
pub struct OfferRepo;

impl OfferRepo {
    pub async fn insert(conn: &mut SqliteConnection, offer: &Offer) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO offers \
             (id, member_id, category, description, estimated_hours, availability, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&offer.id)
        .bind(&offer.member_id)
        .bind(&offer.category)
        .bind(&offer.description)
        .bind(offer.estimated_hours)
        .bind(&offer.availability)
        .bind(offer.created_at)
        .execute(conn)
        .await?;
        Ok(())
    }

    pub async fn get(
        conn: &mut SqliteConnection,
        offer_id: &str,
    ) -> Result<Option<Offer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM offers WHERE id = ?1");
        sqlx::query_as::<_, Offer>(&query)
            .bind(offer_id)
            .fetch_optional(conn)
            .await
    }
}
