// resolver.rs — Rule-based resolution suggestions.

use serde_json::{json, Value};

use crate::step::{Fields, Step, StepFailure, StepResult};

/// Suggests remediation actions and an escalation decision.
///
/// Reads the priority written by the classifier out of the working copy;
/// P0/P1 escalate, everything else follows standard handling.
pub struct ResolverStep;

impl Step for ResolverStep {
    fn name(&self) -> &str {
        "resolver_agent"
    }

    fn invoke(&self, input: &Fields) -> Result<StepResult, StepFailure> {
        let priority = input.get("priority").and_then(Value::as_str).unwrap_or("P2");
        let escalation = matches!(priority, "P0" | "P1");

        let mut output = Fields::new();
        output.insert(
            "suggested_actions".to_string(),
            json!(["Check system logs", "Validate dependencies", "Notify stakeholders"]),
        );
        output.insert(
            "draft_response".to_string(),
            json!("We are investigating the issue and will provide updates shortly."),
        );
        output.insert(
            "escalation".to_string(),
            json!({
                "required": escalation,
                "reason": if escalation { "High priority issue" } else { "Standard handling" },
            }),
        );

        Ok(StepResult { output, meta: Fields::new() })
    }
}
