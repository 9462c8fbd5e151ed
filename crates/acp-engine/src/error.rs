// error.rs — Error types for the pipeline executor.

use thiserror::Error;

use crate::step::StepFailure;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A step returned an error; no subsequent steps were executed.
    #[error("step '{step}' failed: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: StepFailure,
    },

    /// The run exceeded its wall-clock budget between steps.
    #[error("pipeline exceeded its execution budget: {elapsed_ms}ms elapsed, {budget_ms}ms allowed")]
    BudgetExceeded { elapsed_ms: u64, budget_ms: u64 },
}
