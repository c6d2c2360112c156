//! Settlement policy for completed help sessions.
//!
//! `settle` turns (funding source, participants, hours) into a pure
//! [`SettlementPlan`]: the balance adjustments to apply, the recipient to
//! record on the ledger row, and whether completion notifications fire.
//! The caller applies the plan inside a single storage transaction.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// Owner id of the shared community pool balance row.
pub const POOL_OWNER_ID: &str = "pool";

/// Discriminator for a balance holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerKind {
    Member,
    CommunityBank,
}

impl OwnerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerKind::Member => "member",
            OwnerKind::CommunityBank => "community_bank",
        }
    }
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OwnerKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(OwnerKind::Member),
            "community_bank" => Ok(OwnerKind::CommunityBank),
            other => Err(CoreError::Validation(format!(
                "unknown owner kind: {other}"
            ))),
        }
    }
}

/// How a completed session's hours are settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingSource {
    /// Direct member-to-member transfer: helper credited, recipient debited.
    Member,
    /// Helper credited from the community pool; recipient untouched.
    CommunityBank,
    /// Pool-credit-only volunteering; no individual balances move.
    Volunteer,
}

impl FundingSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            FundingSource::Member => "member",
            FundingSource::CommunityBank => "community_bank",
            FundingSource::Volunteer => "volunteer",
        }
    }
}

impl fmt::Display for FundingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FundingSource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(FundingSource::Member),
            "community_bank" => Ok(FundingSource::CommunityBank),
            "volunteer" => Ok(FundingSource::Volunteer),
            other => Err(CoreError::Validation(format!(
                "unknown funding source: {other}"
            ))),
        }
    }
}

/// Lifecycle states of a help session. Completion is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Scheduled,
    Completed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Completed => "completed",
        }
    }
}

/// Reject non-finite or non-positive hour quantities.
pub fn validate_hours(hours: f64) -> Result<(), CoreError> {
    if !hours.is_finite() {
        return Err(CoreError::Validation(format!(
            "hours must be finite, got {hours}"
        )));
    }
    if hours <= 0.0 {
        return Err(CoreError::Validation(format!(
            "hours must be > 0, got {hours}"
        )));
    }
    Ok(())
}

/// A signed delta against one balance row.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceAdjustment {
    pub owner_kind: OwnerKind,
    pub owner_id: DbId,
    pub delta: f64,
}

/// Everything a completion has to persist, computed up front.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementPlan {
    /// Read-modify-write deltas, applied in order within one transaction.
    pub adjustments: Vec<BalanceAdjustment>,
    /// Recipient recorded on the ledger row. `None` exactly for volunteer
    /// completions, which credit no specific recipient.
    pub ledger_recipient: Option<DbId>,
    /// Whether `session_completed` notifications fire for the participants.
    pub notify_participants: bool,
}

/// Compute the settlement plan for a completion.
///
/// Member balances are allowed to go negative: the system models debt, not a
/// spending limit. The pool balance has no enforced floor either.
pub fn settle(
    funding_source: FundingSource,
    helper_id: &str,
    recipient_id: &str,
    agreed_hours: f64,
) -> Result<SettlementPlan, CoreError> {
    validate_hours(agreed_hours)?;

    let pool = |delta: f64| BalanceAdjustment {
        owner_kind: OwnerKind::CommunityBank,
        owner_id: POOL_OWNER_ID.to_string(),
        delta,
    };
    let member = |id: &str, delta: f64| BalanceAdjustment {
        owner_kind: OwnerKind::Member,
        owner_id: id.to_string(),
        delta,
    };

    let plan = match funding_source {
        FundingSource::Volunteer => SettlementPlan {
            adjustments: vec![pool(agreed_hours)],
            ledger_recipient: None,
            notify_participants: false,
        },
        FundingSource::Member => SettlementPlan {
            adjustments: vec![
                member(helper_id, agreed_hours),
                member(recipient_id, -agreed_hours),
            ],
            ledger_recipient: Some(recipient_id.to_string()),
            notify_participants: true,
        },
        FundingSource::CommunityBank => SettlementPlan {
            adjustments: vec![member(helper_id, agreed_hours), pool(-agreed_hours)],
            ledger_recipient: Some(recipient_id.to_string()),
            notify_participants: true,
        },
    };

    Ok(plan)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
