// record.rs — Approval record data model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApprovalError;

/// A human's verdict on a parked request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalDecision {
    Approved,
    Rejected,
}

impl FromStr for ApprovalDecision {
    type Err = ApprovalError;

    /// Parses "approved" / "rejected" (case-insensitive). Anything else
    /// is refused before any write happens.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "approved" => Ok(ApprovalDecision::Approved),
            "rejected" => Ok(ApprovalDecision::Rejected),
            _ => Err(ApprovalError::InvalidDecision(s.to_string())),
        }
    }
}

impl fmt::Display for ApprovalDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApprovalDecision::Approved => write!(f, "approved"),
            ApprovalDecision::Rejected => write!(f, "rejected"),
        }
    }
}

/// One line in the JSONL approvals log.
///
/// `audit_id` is a foreign reference only — existence is checked by the
/// orchestrator against the audit log, never here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApprovalRecord {
    /// Derived identifier: "<audit_id>:<rfc3339 timestamp>".
    pub approval_id: String,

    /// When the decision was recorded (UTC).
    pub timestamp_utc: DateTime<Utc>,

    /// The audit record this decision refers to.
    pub audit_id: Uuid,

    /// The verdict.
    pub decision: ApprovalDecision,

    /// Who decided.
    pub approved_by: String,

    /// Free-form justification.
    pub reason: String,
}

impl ApprovalRecord {
    /// Build a record stamped with the current time.
    pub fn new(
        audit_id: Uuid,
        decision: ApprovalDecision,
        approved_by: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        let timestamp_utc = Utc::now();
        Self {
            approval_id: format!("{}:{}", audit_id, timestamp_utc.to_rfc3339()),
            timestamp_utc,
            audit_id,
            decision,
            approved_by: approved_by.into(),
            reason: reason.into(),
        }
    }
}
