// error.rs — Error types for the control-plane orchestrator.
//
// Internal component failures arrive as typed errors from the policy,
// engine, audit, and approvals crates; the orchestrator is the only
// layer that turns them into user-visible results.

use thiserror::Error;
use uuid::Uuid;

use acp_approvals::ApprovalError;
use acp_audit::{AuditError, AuditStatus};
use acp_engine::EngineError;

/// Errors surfaced by control-plane operations.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Malformed request — rejected before policy evaluation, not logged.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An approval or replay referenced an unknown audit id.
    #[error("no audit record found for id '{audit_id}'")]
    AuditNotFound { audit_id: Uuid },

    /// The referenced record carries no sanitized request to execute.
    #[error("audit record '{audit_id}' carries no sanitized request; refusing to run")]
    MissingSanitizedRequest { audit_id: Uuid },

    /// Resume was asked for a record the gate never parked.
    #[error("audit record '{audit_id}' is not awaiting approval (status: {status})")]
    NotAwaitingApproval { audit_id: Uuid, status: AuditStatus },

    /// Resume was asked before any human decision was recorded.
    #[error("audit record '{audit_id}' has no approval decision on file")]
    ApprovalMissing { audit_id: Uuid },

    /// Resume was asked but the latest decision on file is a rejection.
    #[error("audit record '{audit_id}' was rejected by '{rejected_by}'")]
    ApprovalRejected { audit_id: Uuid, rejected_by: String },

    /// A step failed or the execution budget was breached mid-run.
    #[error(transparent)]
    Pipeline(#[from] EngineError),

    /// The audit log could not be read or written.
    #[error(transparent)]
    Audit(#[from] AuditError),

    /// The approval register refused the decision or failed to persist it.
    #[error(transparent)]
    Approval(#[from] ApprovalError),
}
