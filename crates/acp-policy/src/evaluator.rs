// evaluator.rs — Risk scoring and the policy decision ladder.
//
// The evaluator is the single gate every request passes before the
// pipeline may run:
//
// 1. Scan the free-text fields (title, description) with the redaction
//    matchers, in priority order, recording each kind at most once.
// 2. pii_detected ← any kind recorded.
// 3. risk_score ← 0.70 with PII, 0.25 without (fixed two-tier scheme).
// 4. Walk the threshold ladder, first match wins:
//    ≥ 0.90 → Block; ≥ 0.70 → RequireApproval; PII → AllowWithRedaction;
//    otherwise Allow.
// 5. confidence_score is a fixed constant until a learned signal exists.
//
// Redaction and scoring are kept separate so the ladder can grow into a
// weighted multi-signal scorer without touching the matchers.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::redaction::{redact_text, RedactionKind};

/// A request's named fields. serde_json maps are key-sorted, so their
/// serialized form is canonical without extra work.
pub type Fields = serde_json::Map<String, Value>;

/// Free-text fields scanned for sensitive content, in scan order.
pub const SCANNED_FIELDS: &[&str] = &["title", "description"];

/// Risk score assigned when any sensitive content was detected.
pub const PII_RISK_SCORE: f64 = 0.70;
/// Baseline risk score for a clean request.
pub const BASELINE_RISK_SCORE: f64 = 0.25;
/// Requests at or above this score are blocked outright.
pub const BLOCK_THRESHOLD: f64 = 0.90;
/// Requests at or above this score require a human decision.
pub const APPROVAL_THRESHOLD: f64 = 0.70;
/// Stand-in for a future learned-confidence signal; stays in [0, 1].
pub const CONFIDENCE_SCORE: f64 = 0.85;

/// What the gate decided about a request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PolicyAction {
    /// Clean request — run the pipeline as-is.
    Allow,
    /// Sensitive content found and replaced — run on the sanitized copy.
    AllowWithRedaction,
    /// Too risky to run unattended — park until a human decides.
    RequireApproval,
    /// Refused outright. The pipeline never runs.
    Block,
}

impl PolicyAction {
    /// Walk the threshold ladder. Evaluated top-down, first match wins.
    pub fn from_risk(risk_score: f64, pii_detected: bool) -> Self {
        if risk_score >= BLOCK_THRESHOLD {
            PolicyAction::Block
        } else if risk_score >= APPROVAL_THRESHOLD {
            PolicyAction::RequireApproval
        } else if pii_detected {
            PolicyAction::AllowWithRedaction
        } else {
            PolicyAction::Allow
        }
    }

    /// True iff the pipeline may run without a human decision.
    pub fn is_allowed(&self) -> bool {
        matches!(self, PolicyAction::Allow | PolicyAction::AllowWithRedaction)
    }

    /// True iff a human decision must be recorded before execution.
    pub fn requires_approval(&self) -> bool {
        matches!(self, PolicyAction::RequireApproval)
    }
}

/// The immutable result of one policy evaluation.
///
/// `allowed` and `requires_approval` are denormalized from `action` for
/// consumers reading the serialized record; `evaluate` is the only
/// producer, so they can never disagree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicyDecision {
    /// The ladder outcome.
    pub action: PolicyAction,

    /// True iff action is Allow or AllowWithRedaction.
    pub allowed: bool,

    /// True iff action is RequireApproval.
    pub requires_approval: bool,

    /// Whether any sensitive content was detected.
    pub pii_detected: bool,

    /// The kinds detected, priority order, each at most once.
    pub redactions: Vec<RedactionKind>,

    /// Free-form gate annotations (e.g., "pii_detected").
    pub policy_flags: Vec<String>,

    /// Risk in [0, 1]; drives the ladder.
    pub risk_score: f64,

    /// Confidence in [0, 1]; constant in this scheme.
    pub confidence_score: f64,

    /// Copy of the request with scanned fields redacted. Always present
    /// on a fresh evaluation; `Option` so historical records missing the
    /// artifact stay parseable (replay rejects those explicitly).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sanitized_request: Option<Fields>,

    /// Set only on the decision embedded in a replayed audit record,
    /// pointing at the record the sanitized input was taken from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replayed_from_audit_id: Option<Uuid>,
}

/// Evaluate a request against the gate. Pure: no I/O, input untouched.
///
/// A sanitized copy is produced for every outcome, including `Block` —
/// the audit trail stores it even for refused requests.
pub fn evaluate(request: &Fields) -> PolicyDecision {
    let mut sanitized = request.clone();
    let mut redactions: Vec<RedactionKind> = Vec::new();

    for field in SCANNED_FIELDS {
        let Some(text) = request.get(*field).and_then(Value::as_str) else {
            continue;
        };
        let (redacted, kinds) = redact_text(text);
        for kind in kinds {
            if !redactions.contains(&kind) {
                redactions.push(kind);
            }
        }
        sanitized.insert((*field).to_string(), Value::String(redacted));
    }

    let pii_detected = !redactions.is_empty();

    let mut policy_flags = Vec::new();
    if pii_detected {
        policy_flags.push("pii_detected".to_string());
    }

    let risk_score = if pii_detected { PII_RISK_SCORE } else { BASELINE_RISK_SCORE };
    let action = PolicyAction::from_risk(risk_score, pii_detected);

    tracing::debug!(?action, risk_score, pii_detected, "policy evaluated");

    PolicyDecision {
        action,
        allowed: action.is_allowed(),
        requires_approval: action.requires_approval(),
        pii_detected,
        redactions,
        policy_flags,
        risk_score,
        confidence_score: CONFIDENCE_SCORE,
        sanitized_request: Some(sanitized),
        replayed_from_audit_id: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Helper: build a request map from field/value pairs.
    fn request(pairs: &[(&str, &str)]) -> Fields {
        let mut fields = Fields::new();
        for (key, value) in pairs {
            fields.insert((*key).to_string(), json!(value));
        }
        fields
    }

    #[test]
    fn clean_request_is_allowed() {
        let decision = evaluate(&request(&[
            ("title", "Dashboard outage"),
            ("description", "The analytics dashboard is unreachable"),
        ]));

        assert_eq!(decision.action, PolicyAction::Allow);
        assert!(decision.allowed);
        assert!(!decision.requires_approval);
        assert!(!decision.pii_detected);
        assert!(decision.redactions.is_empty());
        assert!(decision.policy_flags.is_empty());
        assert_eq!(decision.risk_score, BASELINE_RISK_SCORE);
        assert_eq!(decision.confidence_score, CONFIDENCE_SCORE);
    }

    #[test]
    fn email_in_description_requires_approval() {
        let decision = evaluate(&request(&[
            ("title", "Access request"),
            ("description", "Please grant jane@co.com reporting access"),
        ]));

        assert_eq!(decision.action, PolicyAction::RequireApproval);
        assert!(!decision.allowed);
        assert!(decision.requires_approval);
        assert_eq!(decision.redactions, vec![RedactionKind::Email]);
        assert_eq!(decision.policy_flags, vec!["pii_detected".to_string()]);
        assert_eq!(decision.risk_score, PII_RISK_SCORE);
    }

    #[test]
    fn sanitized_copy_replaces_scanned_fields_only() {
        let decision = evaluate(&request(&[
            ("title", "Reset for jane@co.com"),
            ("description", "ID 123-45-6789 on file"),
            ("requester_email", "ops@example.com"),
        ]));

        let sanitized = decision.sanitized_request.expect("sanitized copy");
        assert_eq!(sanitized["title"], json!("Reset for [REDACTED_EMAIL]"));
        assert_eq!(sanitized["description"], json!("ID [REDACTED_NATIONAL_ID] on file"));
        // Unscanned fields pass through untouched, PII or not.
        assert_eq!(sanitized["requester_email"], json!("ops@example.com"));
    }

    #[test]
    fn input_request_is_never_mutated() {
        let original = request(&[("title", "Mail jane@co.com"), ("description", "x")]);
        let snapshot = original.clone();

        let _ = evaluate(&original);
        assert_eq!(original, snapshot);
    }

    #[test]
    fn each_kind_recorded_once_across_fields() {
        let decision = evaluate(&request(&[
            ("title", "From a@b.com"),
            ("description", "Also c@d.com and e@f.com"),
        ]));
        assert_eq!(decision.redactions, vec![RedactionKind::Email]);
    }

    #[test]
    fn sanitized_request_is_clean_on_reevaluation() {
        let first = evaluate(&request(&[
            ("title", "Mail jane@co.com"),
            ("description", "ID 123-45-6789"),
        ]));
        let second = evaluate(&first.sanitized_request.expect("sanitized copy"));

        assert!(!second.pii_detected);
        assert_eq!(second.action, PolicyAction::Allow);
    }

    #[test]
    fn ladder_is_total_and_ordered() {
        // First rung wins: a blocking score never falls through to
        // approval even with PII set.
        assert_eq!(PolicyAction::from_risk(0.95, true), PolicyAction::Block);
        assert_eq!(PolicyAction::from_risk(0.90, false), PolicyAction::Block);
        assert_eq!(PolicyAction::from_risk(0.70, true), PolicyAction::RequireApproval);
        assert_eq!(PolicyAction::from_risk(0.70, false), PolicyAction::RequireApproval);
        assert_eq!(PolicyAction::from_risk(0.25, true), PolicyAction::AllowWithRedaction);
        assert_eq!(PolicyAction::from_risk(0.25, false), PolicyAction::Allow);
        assert_eq!(PolicyAction::from_risk(0.0, false), PolicyAction::Allow);
    }

    #[test]
    fn allowed_and_requires_approval_follow_action() {
        for action in [
            PolicyAction::Allow,
            PolicyAction::AllowWithRedaction,
            PolicyAction::RequireApproval,
            PolicyAction::Block,
        ] {
            assert_eq!(
                action.is_allowed(),
                matches!(action, PolicyAction::Allow | PolicyAction::AllowWithRedaction)
            );
            assert_eq!(action.requires_approval(), matches!(action, PolicyAction::RequireApproval));
        }
    }

    #[test]
    fn missing_scanned_fields_are_skipped() {
        let decision = evaluate(&request(&[("department", "data")]));
        assert_eq!(decision.action, PolicyAction::Allow);
        let sanitized = decision.sanitized_request.expect("sanitized copy");
        assert!(!sanitized.contains_key("title"));
    }

    #[test]
    fn decision_serialization_round_trip() {
        let decision = evaluate(&request(&[
            ("title", "Mail jane@co.com"),
            ("description", "plain"),
        ]));
        let json = serde_json::to_string(&decision).unwrap();
        let restored: PolicyDecision = serde_json::from_str(&json).unwrap();
        assert_eq!(decision, restored);
    }

    #[test]
    fn action_serializes_as_snake_case() {
        let json = serde_json::to_string(&PolicyAction::AllowWithRedaction).unwrap();
        assert_eq!(json, "\"allow_with_redaction\"");
        let json = serde_json::to_string(&PolicyAction::RequireApproval).unwrap();
        assert_eq!(json, "\"require_approval\"");
    }
}
