//! Repository for the `ledger_transactions` table. Append-only; there is no
//! update or delete.

use sqlx::SqliteConnection;

use crate::models::ledger::LedgerTransaction;

/// Column list for `ledger_transactions` queries.
const COLUMNS: &str = "id, helper_member_id, recipient_member_id, hours, funding_source, \
                       session_id, created_at";

/// Provides append and read operations for ledger entries.
pub struct LedgerRepo;

impl LedgerRepo {
    pub async fn insert(
        conn: &mut SqliteConnection,
        entry: &LedgerTransaction,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO ledger_transactions \
             (id, helper_member_id, recipient_member_id, hours, funding_source, \
              session_id, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(&entry.id)
        .bind(&entry.helper_member_id)
        .bind(&entry.recipient_member_id)
        .bind(entry.hours)
        .bind(&entry.funding_source)
        .bind(&entry.session_id)
        .bind(entry.created_at)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Entries where the member is helper or recipient, newest first.
    pub async fn list_for_member(
        conn: &mut SqliteConnection,
        member_id: &str,
    ) -> Result<Vec<LedgerTransaction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ledger_transactions \
             WHERE helper_member_id = ?1 OR recipient_member_id = ?1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, LedgerTransaction>(&query)
            .bind(member_id)
            .fetch_all(conn)
            .await
    }

    /// All entries tied to a session (exactly one for any completed session).
    pub async fn list_for_session(
        conn: &mut SqliteConnection,
        session_id: &str,
    ) -> Result<Vec<LedgerTransaction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ledger_transactions \
             WHERE session_id = ?1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, LedgerTransaction>(&query)
            .bind(session_id)
            .fetch_all(conn)
            .await
    }
}
