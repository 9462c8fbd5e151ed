// classifier.rs — Rule-based intake classification.

use serde_json::{json, Value};

use crate::step::{Fields, Step, StepFailure, StepResult};

/// Classifies a request into a category, priority, and routing team.
///
/// Incident detection is keyword-based on the title; priority maps
/// straight off the urgency field.
pub struct ClassifierStep;

impl Step for ClassifierStep {
    fn name(&self) -> &str {
        "classifier_agent"
    }

    fn invoke(&self, input: &Fields) -> Result<StepResult, StepFailure> {
        let title = input
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_lowercase();
        let urgency = input.get("urgency").and_then(Value::as_str).unwrap_or("low");

        let category = if title.contains("dashboard") || title.contains("outage") {
            "incident"
        } else {
            "request"
        };

        let priority = match urgency {
            "critical" => "P0",
            "high" => "P1",
            _ => "P2",
        };

        let mut output = Fields::new();
        output.insert("category".to_string(), json!(category));
        output.insert("priority".to_string(), json!(priority));
        output.insert("routing_team".to_string(), json!("Data Platform"));

        let mut meta = Fields::new();
        meta.insert("rule_based".to_string(), json!(true));

        Ok(StepResult { output, meta })
    }
}
