//! Typed notification events.
//!
//! The outbox stores an `event_type` discriminator plus an opaque JSON
//! payload. In process the event is a tagged union so payload shapes are
//! checked at compile time; only the persistence boundary sees JSON.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::ledger::FundingSource;
use crate::types::DbId;

/// Discriminator persisted in the `notifications.event_type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    NewHelpRequest,
    OfferAccepted,
    SessionCompleted,
    ReportCreated,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::NewHelpRequest => "new_help_request",
            EventType::OfferAccepted => "offer_accepted",
            EventType::SessionCompleted => "session_completed",
            EventType::ReportCreated => "report_created",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery state of a queued notification. `Sent` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Pending,
    Sent,
    Failed,
}

impl NotificationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStatus::Pending => "pending",
            NotificationStatus::Sent => "sent",
            NotificationStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, NotificationStatus::Sent | NotificationStatus::Failed)
    }
}

impl FromStr for NotificationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(NotificationStatus::Pending),
            "sent" => Ok(NotificationStatus::Sent),
            "failed" => Ok(NotificationStatus::Failed),
            other => Err(CoreError::Validation(format!(
                "unknown notification status: {other}"
            ))),
        }
    }
}

/// Outcome reported by a delivery attempt. `pending` is not a legal target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryOutcome {
    Sent,
    Failed,
}

impl DeliveryOutcome {
    pub fn as_status(&self) -> NotificationStatus {
        match self {
            DeliveryOutcome::Sent => NotificationStatus::Sent,
            DeliveryOutcome::Failed => NotificationStatus::Failed,
        }
    }
}

/// A notification-worthy domain event with its typed payload.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationEvent {
    NewHelpRequest {
        request_id: DbId,
        category: String,
    },
    OfferAccepted {
        session_id: DbId,
    },
    SessionCompleted {
        session_id: DbId,
        agreed_hours: f64,
        funding_source: FundingSource,
    },
    ReportCreated {
        report_id: DbId,
    },
}

impl NotificationEvent {
    pub fn event_type(&self) -> EventType {
        match self {
            NotificationEvent::NewHelpRequest { .. } => EventType::NewHelpRequest,
            NotificationEvent::OfferAccepted { .. } => EventType::OfferAccepted,
            NotificationEvent::SessionCompleted { .. } => EventType::SessionCompleted,
            NotificationEvent::ReportCreated { .. } => EventType::ReportCreated,
        }
    }

    /// JSON stored in `notifications.payload_json`.
    pub fn payload(&self) -> serde_json::Value {
        match self {
            NotificationEvent::NewHelpRequest {
                request_id,
                category,
            } => serde_json::json!({
                "request_id": request_id,
                "category": category,
            }),
            NotificationEvent::OfferAccepted { session_id } => serde_json::json!({
                "session_id": session_id,
            }),
            NotificationEvent::SessionCompleted {
                session_id,
                agreed_hours,
                funding_source,
            } => serde_json::json!({
                "session_id": session_id,
                "agreed_hours": agreed_hours,
                "funding_source": funding_source.as_str(),
            }),
            NotificationEvent::ReportCreated { report_id } => serde_json::json!({
                "report_id": report_id,
            }),
        }
    }
}
