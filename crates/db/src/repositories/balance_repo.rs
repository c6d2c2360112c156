//! Repository for the `balances` table.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;
use timebank_core::ledger::OwnerKind;

/// Provides balance reads and idempotent upserts.
///
/// Callers must read-modify-write within the same transaction as the ledger
/// insert; `set` overwrites, it does not accumulate.
pub struct BalanceRepo;

impl BalanceRepo {
    /// Current balance, treating an absent row as zero.
    pub async fn get(
        conn: &mut SqliteConnection,
        owner_kind: OwnerKind,
        owner_id: &str,
    ) -> Result<f64, sqlx::Error> {
        let hours: Option<f64> = sqlx::query_scalar(
            "SELECT hours FROM balances WHERE owner_kind = ?1 AND owner_id = ?2",
        )
        .bind(owner_kind.as_str())
        .bind(owner_id)
        .fetch_optional(conn)
        .await?;
        Ok(hours.unwrap_or(0.0))
    }

    /// Upsert the balance row to an absolute value.
    pub async fn set(
        conn: &mut SqliteConnection,
        owner_kind: OwnerKind,
        owner_id: &str,
        hours: f64,
        updated_at: DateTime<Utc>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO balances (owner_kind, owner_id, hours, updated_at) \
             VALUES (?1, ?2, ?3, ?4) \
             ON CONFLICT (owner_kind, owner_id) \
             DO UPDATE SET hours = excluded.hours, updated_at = excluded.updated_at",
        )
        .bind(owner_kind.as_str())
        .bind(owner_id)
        .bind(hours)
        .bind(updated_at)
        .execute(conn)
        .await?;
        Ok(())
    }
}
