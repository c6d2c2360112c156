//! Abuse reports: a simpler open -> resolved state machine that reuses the
//! notification outbox for moderator alerts.

use chrono::Utc;
use timebank_core::error::CoreError;
use timebank_core::events::NotificationEvent;
use timebank_core::types::new_id;

use crate::models::report::{CreateReport, Report};
use crate::repositories::{MemberRepo, ReportRepo};
use crate::services::{outbox, ServiceResult};
use crate::DbPool;

/// File a report. Every moderator/admin member is alerted through the
/// prefs-blind path, in the same transaction as the insert.
pub async fn create_report(pool: &DbPool, input: CreateReport) -> ServiceResult<Report> {
    let mut tx = pool.begin().await?;

    if MemberRepo::get(&mut tx, &input.reporter_member_id)
        .await?
        .is_none()
    {
        return Err(CoreError::not_found("Member", input.reporter_member_id).into());
    }

    let now = Utc::now();
    let report = Report {
        id: new_id(),
        reporter_member_id: input.reporter_member_id,
        reported_member_id: input.reported_member_id,
        session_id: input.session_id,
        reason: input.reason,
        status: "open".to_string(),
        resolution_action: None,
        created_at: now,
        resolved_at: None,
    };
    ReportRepo::insert(&mut tx, &report).await?;

    let event = NotificationEvent::ReportCreated {
        report_id: report.id.clone(),
    };
    outbox::enqueue_for_moderators(&mut tx, &event, now).await?;

    tx.commit().await?;

    tracing::info!(report_id = %report.id, "report filed");
    Ok(report)
}

/// Resolve a report, recording the action taken. The caller's role is
/// checked by the request layer; this operation performs no role check.
pub async fn resolve_report(
    pool: &DbPool,
    report_id: &str,
    resolution_action: &str,
) -> ServiceResult<Report> {
    let mut tx = pool.begin().await?;

    let report = ReportRepo::get(&mut tx, report_id)
        .await?
        .ok_or_else(|| CoreError::not_found("Report", report_id))?;

    let now = Utc::now();
    ReportRepo::mark_resolved(&mut tx, report_id, resolution_action, now).await?;

    tx.commit().await?;

    tracing::info!(report_id, action = resolution_action, "report resolved");
    Ok(Report {
        status: "resolved".to_string(),
        resolution_action: Some(resolution_action.to_string()),
        resolved_at: Some(now),
        ..report
    })
}
