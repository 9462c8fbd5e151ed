// orchestrator.rs — The control-plane state machine.
//
// One synchronous invocation per call:
//
//   run:     validate → evaluate → {Blocked | NeedsApproval | execute}
//            → persist one audit record → return the outcome
//   approve: parse decision → audit record must exist → append decision
//   replay:  look up record → re-run the stored sanitized request →
//            persist a Replayed record pointing back at the original
//   resume:  record parked + latest decision Approved → run the stored
//            sanitized request → persist a Succeeded record
//
// Every path that executes the pipeline runs it on a sanitized request.
// Pipeline failures are persisted as Failed records before the typed
// error is surfaced — an explicit choice, not a silent skip.

use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use acp_approvals::{ApprovalDecision, ApprovalRecord, ApprovalRegister};
use acp_audit::{AuditLog, AuditRecord, AuditStatus};
use acp_engine::{Fields, PipelineContext, PipelineExecutor, Step};
use acp_policy::PolicyDecision;

use crate::config::ControlPlaneConfig;
use crate::error::RuntimeError;

/// Gate marker recorded when the pipeline never ran because of a refusal.
const GATE_BLOCK_MARKER: &str = "policy_block";
/// Gate marker recorded when the request was parked for a human decision.
const GATE_APPROVAL_MARKER: &str = "policy_approval_required";
/// Marker recorded when the pipeline started but did not finish.
const PIPELINE_FAILURE_MARKER: &str = "pipeline_failure";

/// Fields every intake request must carry as JSON strings.
const REQUIRED_INTAKE_FIELDS: &[&str] = &[
    "title",
    "description",
    "requester_email",
    "department",
    "system",
    "urgency",
];

/// What one control-plane invocation produced, ready for the transport
/// collaborator to render. The persisted audit record rides along; on
/// completion (fresh run, replay, or resume) so does the full context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The gate refused the request; the pipeline never ran.
    Blocked { audit: AuditRecord },
    /// The gate parked the request pending a human decision.
    NeedsApproval { audit: AuditRecord },
    /// The pipeline ran to completion.
    Completed {
        audit: AuditRecord,
        context: PipelineContext,
    },
}

/// Composes the gate, the executor, and the two durable logs.
pub struct Orchestrator {
    audit: AuditLog,
    approvals: ApprovalRegister,
    executor: PipelineExecutor,
}

impl Orchestrator {
    /// Open both logs and set up the executor from the given config.
    pub fn new(config: &ControlPlaneConfig) -> Result<Self, RuntimeError> {
        let executor = match config.step_budget() {
            Some(budget) => PipelineExecutor::with_budget(budget),
            None => PipelineExecutor::new(),
        };

        Ok(Self {
            audit: AuditLog::open(&config.audit_log)?,
            approvals: ApprovalRegister::open(&config.approvals_log)?,
            executor,
        })
    }

    /// Gate a request and, when allowed, run the pipeline on its
    /// sanitized copy. Exactly one audit record is persisted per call
    /// that passes validation.
    pub fn run(&self, steps: &[Box<dyn Step>], request: &Fields) -> Result<RunOutcome, RuntimeError> {
        validate_intake(request)?;

        let started = Instant::now();
        let decision = acp_policy::evaluate(request);

        if decision.requires_approval {
            let record = self.persist(
                request,
                vec![GATE_APPROVAL_MARKER.to_string()],
                decision,
                started,
                AuditStatus::NeedsApproval,
            )?;
            tracing::info!(audit_id = %record.audit_id, "request parked for approval");
            return Ok(RunOutcome::NeedsApproval { audit: record });
        }

        if !decision.allowed {
            let record = self.persist(
                request,
                vec![GATE_BLOCK_MARKER.to_string()],
                decision,
                started,
                AuditStatus::Blocked,
            )?;
            tracing::info!(audit_id = %record.audit_id, "request blocked by policy");
            return Ok(RunOutcome::Blocked { audit: record });
        }

        // The gate always produces a sanitized copy; refuse to proceed
        // rather than ever executing the raw request.
        let sanitized = decision
            .sanitized_request
            .clone()
            .ok_or_else(|| RuntimeError::InvalidRequest("policy produced no sanitized request".to_string()))?;

        match self.executor.run(steps, &sanitized) {
            Ok(context) => {
                let record = self.persist(
                    request,
                    context.step_names(),
                    decision,
                    started,
                    AuditStatus::Succeeded,
                )?;
                Ok(RunOutcome::Completed { audit: record, context })
            }
            Err(failure) => {
                self.persist(
                    request,
                    vec![PIPELINE_FAILURE_MARKER.to_string()],
                    decision,
                    started,
                    AuditStatus::Failed,
                )?;
                Err(RuntimeError::Pipeline(failure))
            }
        }
    }

    /// Record a human decision for a parked request.
    ///
    /// The decision string is parsed before anything is written; an
    /// unknown audit id appends nothing to the register.
    pub fn approve(
        &self,
        audit_id: Uuid,
        decision: &str,
        approved_by: &str,
        reason: &str,
    ) -> Result<ApprovalRecord, RuntimeError> {
        let decision = ApprovalDecision::from_str(decision)?;

        if self.audit.find_by_id(audit_id)?.is_none() {
            return Err(RuntimeError::AuditNotFound { audit_id });
        }

        Ok(self.approvals.record(audit_id, decision, approved_by, reason)?)
    }

    /// Re-execute a past invocation from the log.
    ///
    /// Replay is re-execution of history: the stored sanitized request
    /// runs, never the caller's current input. A new `Replayed` record
    /// is persisted pointing back at the original; the original record
    /// is untouched.
    pub fn replay(&self, audit_id: Uuid, steps: &[Box<dyn Step>]) -> Result<RunOutcome, RuntimeError> {
        let original = self
            .audit
            .find_by_id(audit_id)?
            .ok_or(RuntimeError::AuditNotFound { audit_id })?;

        let sanitized = original
            .policy
            .sanitized_request
            .clone()
            .ok_or(RuntimeError::MissingSanitizedRequest { audit_id })?;

        let mut policy = original.policy.clone();
        policy.replayed_from_audit_id = Some(audit_id);

        let started = Instant::now();
        match self.executor.run(steps, &sanitized) {
            Ok(context) => {
                // The replay record fingerprints the sanitized request —
                // the input actually submitted to this invocation.
                let record = self.persist(
                    &sanitized,
                    context.step_names(),
                    policy,
                    started,
                    AuditStatus::Replayed,
                )?;
                tracing::info!(audit_id = %record.audit_id, replayed_from = %audit_id, "replay completed");
                Ok(RunOutcome::Completed { audit: record, context })
            }
            Err(failure) => {
                self.persist(
                    &sanitized,
                    vec![PIPELINE_FAILURE_MARKER.to_string()],
                    policy,
                    started,
                    AuditStatus::Failed,
                )?;
                Err(RuntimeError::Pipeline(failure))
            }
        }
    }

    /// Run a parked request once its approval is on file.
    ///
    /// Requires the record to be in `NeedsApproval` status and the
    /// latest register decision for it to be `Approved`. A new
    /// `Succeeded` record is persisted; the parked record is untouched.
    pub fn resume(&self, audit_id: Uuid, steps: &[Box<dyn Step>]) -> Result<RunOutcome, RuntimeError> {
        let parked = self
            .audit
            .find_by_id(audit_id)?
            .ok_or(RuntimeError::AuditNotFound { audit_id })?;

        if parked.status != AuditStatus::NeedsApproval {
            return Err(RuntimeError::NotAwaitingApproval {
                audit_id,
                status: parked.status,
            });
        }

        let decisions = self.approvals.find_for_audit(audit_id)?;
        let Some(latest) = decisions.last() else {
            return Err(RuntimeError::ApprovalMissing { audit_id });
        };
        if latest.decision != ApprovalDecision::Approved {
            return Err(RuntimeError::ApprovalRejected {
                audit_id,
                rejected_by: latest.approved_by.clone(),
            });
        }

        let sanitized = parked
            .policy
            .sanitized_request
            .clone()
            .ok_or(RuntimeError::MissingSanitizedRequest { audit_id })?;

        let started = Instant::now();
        match self.executor.run(steps, &sanitized) {
            Ok(context) => {
                // The stored decision is embedded unchanged — honest
                // history of what the gate said at intake time.
                let record = self.persist(
                    &sanitized,
                    context.step_names(),
                    parked.policy.clone(),
                    started,
                    AuditStatus::Succeeded,
                )?;
                tracing::info!(audit_id = %record.audit_id, resumed_from = %audit_id, "parked request resumed");
                Ok(RunOutcome::Completed { audit: record, context })
            }
            Err(failure) => {
                self.persist(
                    &sanitized,
                    vec![PIPELINE_FAILURE_MARKER.to_string()],
                    parked.policy.clone(),
                    started,
                    AuditStatus::Failed,
                )?;
                Err(RuntimeError::Pipeline(failure))
            }
        }
    }

    /// Look up a persisted audit record by id.
    pub fn find_audit(&self, audit_id: Uuid) -> Result<Option<AuditRecord>, RuntimeError> {
        Ok(self.audit.find_by_id(audit_id)?)
    }

    /// Build and append one audit record.
    fn persist(
        &self,
        hashed_request: &Fields,
        agents_invoked: Vec<String>,
        policy: PolicyDecision,
        started: Instant,
        status: AuditStatus,
    ) -> Result<AuditRecord, RuntimeError> {
        let latency_ms = started.elapsed().as_millis() as u64;
        let record = AuditRecord::build(hashed_request, agents_invoked, policy, latency_ms, status)?;
        self.audit.append(&record)?;
        Ok(record)
    }
}

/// Reject malformed requests before the gate ever sees them.
///
/// The six intake fields must be present as JSON strings. Validation
/// failures are never logged.
fn validate_intake(request: &Fields) -> Result<(), RuntimeError> {
    for field in REQUIRED_INTAKE_FIELDS {
        match request.get(*field) {
            None => {
                return Err(RuntimeError::InvalidRequest(format!(
                    "missing required field '{}'",
                    field
                )))
            }
            Some(value) if !value.is_string() => {
                return Err(RuntimeError::InvalidRequest(format!(
                    "field '{}' must be a string",
                    field
                )))
            }
            Some(_) => {}
        }
    }
    Ok(())
}
