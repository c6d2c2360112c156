//! Integration tests for abuse reports and moderator alerts.

use assert_matches::assert_matches;
use sqlx::SqlitePool;
use timebank_core::error::CoreError;
use timebank_core::events::EventType;
use timebank_core::roles::{ROLE_ADMIN, ROLE_MODERATOR};
use timebank_db::models::member::{CreateMember, Member};
use timebank_db::models::notification::UpdateNotificationPrefs;
use timebank_db::models::report::CreateReport;
use timebank_db::services::{members, moderation, outbox, ServiceError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn enroll_with_role(
    pool: &SqlitePool,
    user_id: &str,
    name: &str,
    role: Option<&str>,
) -> Member {
    members::enroll(
        pool,
        CreateMember {
            user_id: user_id.to_string(),
            name: name.to_string(),
            contact: format!("{user_id}@example.org"),
            area: "east".to_string(),
            role: role.map(str::to_string),
        },
    )
    .await
    .unwrap()
}

fn new_report(reporter: &Member, reported: Option<&Member>) -> CreateReport {
    CreateReport {
        reporter_member_id: reporter.id.clone(),
        reported_member_id: reported.map(|m| m.id.clone()),
        session_id: None,
        reason: "no-show at the agreed time".to_string(),
    }
}

async fn alert_count(pool: &SqlitePool, member: &Member) -> usize {
    outbox::list_for_member(pool, &member.id)
        .await
        .unwrap()
        .iter()
        .filter(|n| n.event_type == EventType::ReportCreated.as_str())
        .count()
}

// ---------------------------------------------------------------------------
// Test: report creation and moderator alerts
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn report_alerts_every_moderation_member(pool: SqlitePool) {
    let reporter = enroll_with_role(&pool, "u-rep", "Ana", None).await;
    let reported = enroll_with_role(&pool, "u-bad", "Bela", None).await;
    let moderator = enroll_with_role(&pool, "u-mod", "Caio", Some(ROLE_MODERATOR)).await;
    let admin = enroll_with_role(&pool, "u-adm", "Dara", Some(ROLE_ADMIN)).await;

    let report = moderation::create_report(&pool, new_report(&reporter, Some(&reported)))
        .await
        .unwrap();

    assert_eq!(report.status, "open");
    assert_eq!(report.resolution_action, None);
    assert_eq!(alert_count(&pool, &moderator).await, 1);
    assert_eq!(alert_count(&pool, &admin).await, 1);
    // Plain members are never alerted.
    assert_eq!(alert_count(&pool, &reporter).await, 0);
    assert_eq!(alert_count(&pool, &reported).await, 0);
}

#[sqlx::test]
async fn moderator_alerts_bypass_preferences(pool: SqlitePool) {
    let reporter = enroll_with_role(&pool, "u-rep", "Ana", None).await;
    let moderator = enroll_with_role(&pool, "u-mod", "Caio", Some(ROLE_MODERATOR)).await;

    // The moderator has switched everything off.
    outbox::update_prefs(
        &pool,
        &moderator.id,
        UpdateNotificationPrefs {
            on_new_request: Some(false),
            on_offer_accepted: Some(false),
            on_session_completed: Some(false),
            channel_email: Some(false),
        },
    )
    .await
    .unwrap();

    moderation::create_report(&pool, new_report(&reporter, None))
        .await
        .unwrap();

    // Role-based alerts do not consult personal preferences.
    assert_eq!(alert_count(&pool, &moderator).await, 1);
}

#[sqlx::test]
async fn report_from_unknown_member_is_not_found(pool: SqlitePool) {
    let err = moderation::create_report(
        &pool,
        CreateReport {
            reporter_member_id: "ghost".to_string(),
            reported_member_id: None,
            session_id: None,
            reason: "spam".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert_matches!(err, ServiceError::Core(CoreError::NotFound { .. }));
}

// ---------------------------------------------------------------------------
// Test: resolution lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn resolve_records_action_and_timestamp(pool: SqlitePool) {
    let reporter = enroll_with_role(&pool, "u-rep", "Ana", None).await;
    let report = moderation::create_report(&pool, new_report(&reporter, None))
        .await
        .unwrap();

    let resolved = moderation::resolve_report(&pool, &report.id, "warning issued")
        .await
        .unwrap();

    assert_eq!(resolved.status, "resolved");
    assert_eq!(resolved.resolution_action.as_deref(), Some("warning issued"));
    assert!(resolved.resolved_at.is_some());
}

#[sqlx::test]
async fn resolving_unknown_report_is_not_found(pool: SqlitePool) {
    let err = moderation::resolve_report(&pool, "ghost", "dismissed")
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Core(CoreError::NotFound { .. }));
}
