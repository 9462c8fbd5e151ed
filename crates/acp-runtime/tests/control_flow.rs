// control_flow.rs — End-to-end control-plane scenarios.
//
// Each test gets its own temp directory, so the logs start empty and
// every scenario is independent.

use serde_json::json;
use tempfile::{tempdir, TempDir};
use uuid::Uuid;

use acp_approvals::ApprovalError;
use acp_audit::{AuditLog, AuditRecord, AuditStatus};
use acp_engine::{default_steps, Fields, Step, StepFailure, StepResult};
use acp_policy::RedactionKind;
use acp_runtime::{ControlPlaneConfig, Orchestrator, RunOutcome, RuntimeError};

/// Helper: a complete intake request with the given description.
fn intake(description: &str) -> Fields {
    let mut fields = Fields::new();
    for (key, value) in [
        ("title", "Dashboard outage"),
        ("description", description),
        ("requester_email", "ops@example.com"),
        ("department", "data"),
        ("system", "analytics"),
        ("urgency", "critical"),
    ] {
        fields.insert(key.to_string(), json!(value));
    }
    fields
}

/// Helper: fresh orchestrator over a private temp directory.
fn setup() -> (TempDir, ControlPlaneConfig, Orchestrator) {
    let dir = tempdir().unwrap();
    let config = ControlPlaneConfig::for_root(dir.path());
    let orchestrator = Orchestrator::new(&config).unwrap();
    (dir, config, orchestrator)
}

struct FailingStep;

impl Step for FailingStep {
    fn name(&self) -> &str {
        "failing_agent"
    }

    fn invoke(&self, _input: &Fields) -> Result<StepResult, StepFailure> {
        Err(StepFailure::new("rule engine unavailable"))
    }
}

struct SlowStep;

impl Step for SlowStep {
    fn name(&self) -> &str {
        "slow_agent"
    }

    fn invoke(&self, _input: &Fields) -> Result<StepResult, StepFailure> {
        std::thread::sleep(std::time::Duration::from_millis(20));
        Ok(StepResult::default())
    }
}

#[test]
fn clean_critical_incident_runs_to_completion() {
    let (_dir, _config, orchestrator) = setup();

    let outcome = orchestrator
        .run(&default_steps(), &intake("The analytics dashboard is unreachable"))
        .unwrap();

    let RunOutcome::Completed { audit, context } = outcome else {
        panic!("expected Completed outcome");
    };

    assert_eq!(audit.status, AuditStatus::Succeeded);
    assert_eq!(audit.agents_invoked, vec!["classifier_agent", "resolver_agent"]);
    assert!(!audit.policy.pii_detected);

    assert_eq!(context.final_output["category"], json!("incident"));
    assert_eq!(context.final_output["priority"], json!("P0"));
    assert_eq!(context.final_output["escalation"]["required"], json!(true));

    // The persisted record is findable by its id.
    let found = orchestrator.find_audit(audit.audit_id).unwrap().expect("record on file");
    assert_eq!(found.audit_id, audit.audit_id);
}

#[test]
fn pii_in_description_parks_the_request() {
    let (_dir, _config, orchestrator) = setup();

    let outcome = orchestrator
        .run(&default_steps(), &intake("please contact jane@co.com"))
        .unwrap();

    let RunOutcome::NeedsApproval { audit } = outcome else {
        panic!("expected NeedsApproval outcome");
    };

    assert_eq!(audit.status, AuditStatus::NeedsApproval);
    // The pipeline never ran — only the gate marker is recorded.
    assert_eq!(audit.agents_invoked, vec!["policy_approval_required"]);
    assert_eq!(audit.policy.redactions, vec![RedactionKind::Email]);
    assert_eq!(audit.policy.risk_score, 0.70);

    let sanitized = audit.policy.sanitized_request.as_ref().expect("sanitized copy stored");
    assert_eq!(sanitized["description"], json!("please contact [REDACTED_EMAIL]"));
}

#[test]
fn approving_an_unknown_audit_id_appends_nothing() {
    let (_dir, config, orchestrator) = setup();

    let err = orchestrator
        .approve(Uuid::new_v4(), "approved", "ops@example.com", "")
        .unwrap_err();

    match err {
        RuntimeError::AuditNotFound { .. } => {}
        other => panic!("expected AuditNotFound, got {:?}", other),
    }

    let register_contents = std::fs::read_to_string(&config.approvals_log).unwrap();
    assert!(register_contents.is_empty(), "register must stay empty");
}

#[test]
fn invalid_decision_is_rejected_before_any_write() {
    let (_dir, config, orchestrator) = setup();

    let err = orchestrator
        .approve(Uuid::new_v4(), "maybe", "ops@example.com", "")
        .unwrap_err();

    match err {
        RuntimeError::Approval(ApprovalError::InvalidDecision(value)) => assert_eq!(value, "maybe"),
        other => panic!("expected InvalidDecision, got {:?}", other),
    }

    let register_contents = std::fs::read_to_string(&config.approvals_log).unwrap();
    assert!(register_contents.is_empty());
}

#[test]
fn replay_reproduces_the_original_output() {
    let (_dir, _config, orchestrator) = setup();

    let original = orchestrator
        .run(&default_steps(), &intake("The analytics dashboard is unreachable"))
        .unwrap();
    let RunOutcome::Completed { audit: first, context: first_context } = original else {
        panic!("expected Completed outcome");
    };

    let replayed = orchestrator.replay(first.audit_id, &default_steps()).unwrap();
    let RunOutcome::Completed { audit: second, context: second_context } = replayed else {
        panic!("expected Completed outcome");
    };

    assert_eq!(second.status, AuditStatus::Replayed);
    assert_eq!(second.policy.replayed_from_audit_id, Some(first.audit_id));
    assert_ne!(second.audit_id, first.audit_id);
    assert_eq!(second_context.final_output, first_context.final_output);

    // The original record is untouched.
    let untouched = orchestrator.find_audit(first.audit_id).unwrap().expect("original on file");
    assert_eq!(untouched.status, AuditStatus::Succeeded);
    assert_eq!(untouched.policy.replayed_from_audit_id, None);
}

#[test]
fn replay_of_unknown_id_is_not_found() {
    let (_dir, _config, orchestrator) = setup();

    let err = orchestrator.replay(Uuid::new_v4(), &default_steps()).unwrap_err();
    match err {
        RuntimeError::AuditNotFound { .. } => {}
        other => panic!("expected AuditNotFound, got {:?}", other),
    }
}

#[test]
fn replay_refuses_a_record_without_a_sanitized_request() {
    let dir = tempdir().unwrap();
    let config = ControlPlaneConfig::for_root(dir.path());

    // Persist a record whose stored decision lost its sanitized copy.
    let request = intake("plain");
    let mut policy = acp_policy::evaluate(&request);
    policy.sanitized_request = None;
    let record = AuditRecord::build(&request, vec![], policy, 0, AuditStatus::Succeeded).unwrap();
    {
        let log = AuditLog::open(&config.audit_log).unwrap();
        log.append(&record).unwrap();
    }

    let orchestrator = Orchestrator::new(&config).unwrap();
    let err = orchestrator.replay(record.audit_id, &default_steps()).unwrap_err();

    match err {
        RuntimeError::MissingSanitizedRequest { audit_id } => assert_eq!(audit_id, record.audit_id),
        other => panic!("expected MissingSanitizedRequest, got {:?}", other),
    }
}

#[test]
fn resume_requires_a_recorded_approval() {
    let (_dir, _config, orchestrator) = setup();

    let outcome = orchestrator
        .run(&default_steps(), &intake("please contact jane@co.com"))
        .unwrap();
    let RunOutcome::NeedsApproval { audit } = outcome else {
        panic!("expected NeedsApproval outcome");
    };

    // No decision on file yet.
    match orchestrator.resume(audit.audit_id, &default_steps()).unwrap_err() {
        RuntimeError::ApprovalMissing { .. } => {}
        other => panic!("expected ApprovalMissing, got {:?}", other),
    }

    // A rejection does not unlock execution.
    orchestrator
        .approve(audit.audit_id, "rejected", "lead@example.com", "not in department")
        .unwrap();
    match orchestrator.resume(audit.audit_id, &default_steps()).unwrap_err() {
        RuntimeError::ApprovalRejected { rejected_by, .. } => {
            assert_eq!(rejected_by, "lead@example.com");
        }
        other => panic!("expected ApprovalRejected, got {:?}", other),
    }

    // The latest decision wins: an approval after the rejection unlocks.
    orchestrator
        .approve(audit.audit_id, "approved", "director@example.com", "verified")
        .unwrap();
    let resumed = orchestrator.resume(audit.audit_id, &default_steps()).unwrap();
    let RunOutcome::Completed { audit: new_record, context } = resumed else {
        panic!("expected Completed outcome");
    };

    assert_eq!(new_record.status, AuditStatus::Succeeded);
    // The pipeline ran on the stored sanitized copy.
    assert_eq!(
        context.initial_input["description"],
        json!("please contact [REDACTED_EMAIL]")
    );
}

#[test]
fn resume_rejects_records_that_were_never_parked() {
    let (_dir, _config, orchestrator) = setup();

    let outcome = orchestrator
        .run(&default_steps(), &intake("The analytics dashboard is unreachable"))
        .unwrap();
    let RunOutcome::Completed { audit, .. } = outcome else {
        panic!("expected Completed outcome");
    };

    match orchestrator.resume(audit.audit_id, &default_steps()).unwrap_err() {
        RuntimeError::NotAwaitingApproval { status, .. } => {
            assert_eq!(status, AuditStatus::Succeeded);
        }
        other => panic!("expected NotAwaitingApproval, got {:?}", other),
    }
}

#[test]
fn malformed_request_is_rejected_before_logging() {
    let (_dir, config, orchestrator) = setup();

    let mut request = intake("plain");
    request.remove("department");

    match orchestrator.run(&default_steps(), &request).unwrap_err() {
        RuntimeError::InvalidRequest(message) => assert!(message.contains("department")),
        other => panic!("expected InvalidRequest, got {:?}", other),
    }

    assert!(AuditLog::read_all(&config.audit_log).unwrap().is_empty());
}

#[test]
fn failing_step_persists_a_failed_record() {
    let (_dir, config, orchestrator) = setup();

    let steps: Vec<Box<dyn Step>> = vec![Box::new(FailingStep)];
    let err = orchestrator.run(&steps, &intake("plain")).unwrap_err();
    match err {
        RuntimeError::Pipeline(_) => {}
        other => panic!("expected Pipeline, got {:?}", other),
    }

    let records = AuditLog::read_all(&config.audit_log).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, AuditStatus::Failed);
    assert_eq!(records[0].agents_invoked, vec!["pipeline_failure"]);
}

#[test]
fn budget_breach_is_reported_as_a_pipeline_failure() {
    let dir = tempdir().unwrap();
    let mut config = ControlPlaneConfig::for_root(dir.path());
    config.step_budget_ms = Some(1);
    let orchestrator = Orchestrator::new(&config).unwrap();

    let steps: Vec<Box<dyn Step>> = vec![Box::new(SlowStep), Box::new(FailingStep)];
    let err = orchestrator.run(&steps, &intake("plain")).unwrap_err();

    match err {
        RuntimeError::Pipeline(acp_engine::EngineError::BudgetExceeded { .. }) => {}
        other => panic!("expected BudgetExceeded, got {:?}", other),
    }

    let records = AuditLog::read_all(&config.audit_log).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, AuditStatus::Failed);
}
