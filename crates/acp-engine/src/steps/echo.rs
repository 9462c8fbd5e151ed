// echo.rs — Trivial pass-through step, handy in tests and smoke runs.

use serde_json::json;

use crate::step::{Fields, Step, StepFailure, StepResult};

/// Marks the request as processed and does nothing else.
pub struct EchoStep;

impl Step for EchoStep {
    fn name(&self) -> &str {
        "echo_agent"
    }

    fn invoke(&self, _input: &Fields) -> Result<StepResult, StepFailure> {
        let mut output = Fields::new();
        output.insert("processed".to_string(), json!(true));

        let mut meta = Fields::new();
        meta.insert("note".to_string(), json!("echo execution"));

        Ok(StepResult { output, meta })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_marks_processed() {
        let result = EchoStep.invoke(&Fields::new()).unwrap();
        assert_eq!(result.output["processed"], json!(true));
        assert_eq!(result.meta["note"], json!("echo execution"));
    }
}
