// record.rs — Audit record data model.
//
// One AuditRecord is built per control-plane decision. The input hash
// fingerprints what was actually submitted (pre-sanitization); the
// embedded policy decision carries the sanitized copy that replay runs
// against. Records are immutable once built.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use acp_policy::{Fields, PolicyDecision};

use crate::error::AuditError;
use crate::hasher;

/// Terminal status of one control-plane invocation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    /// The gate parked the request pending a human decision.
    NeedsApproval,
    /// The gate refused the request; the pipeline never ran.
    Blocked,
    /// The pipeline ran to completion.
    Succeeded,
    /// A past sanitized request was re-executed from the log.
    Replayed,
    /// A step failed or the execution budget was breached mid-run.
    Failed,
}

impl fmt::Display for AuditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditStatus::NeedsApproval => write!(f, "needs_approval"),
            AuditStatus::Blocked => write!(f, "blocked"),
            AuditStatus::Succeeded => write!(f, "succeeded"),
            AuditStatus::Replayed => write!(f, "replayed"),
            AuditStatus::Failed => write!(f, "failed"),
        }
    }
}

/// One line in the JSONL audit log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditRecord {
    /// Globally unique identifier, generated at build time.
    pub audit_id: Uuid,

    /// When the record was built (UTC).
    pub timestamp_utc: DateTime<Utc>,

    /// SHA-256 of the canonical JSON of the original request — the
    /// pre-sanitization fingerprint of what was actually submitted.
    pub input_hash: String,

    /// Ordered step names invoked, or a gate marker such as
    /// "policy_block" when the pipeline never ran.
    pub agents_invoked: Vec<String>,

    /// The full policy decision, sanitized request included.
    pub policy: PolicyDecision,

    /// Wall-clock latency of the invocation, in milliseconds.
    pub latency_ms: u64,

    /// How the invocation ended.
    pub status: AuditStatus,
}

impl AuditRecord {
    /// Build a record for one invocation.
    ///
    /// `original_request` must be the caller's request as submitted, not
    /// the sanitized copy — the hash is a tamper-evidence fingerprint,
    /// distinct from the replay artifact inside `policy`.
    pub fn build(
        original_request: &Fields,
        agents_invoked: Vec<String>,
        policy: PolicyDecision,
        latency_ms: u64,
        status: AuditStatus,
    ) -> Result<Self, AuditError> {
        Ok(Self {
            audit_id: Uuid::new_v4(),
            timestamp_utc: Utc::now(),
            input_hash: hasher::hash_fields(original_request)?,
            agents_invoked,
            policy,
            latency_ms,
            status,
        })
    }
}
