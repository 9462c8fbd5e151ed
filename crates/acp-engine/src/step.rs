// step.rs — The step capability interface.
//
// Concrete steps (classification rules, resolution rules, arbitrary
// business logic) implement this one trait and are registered into an
// ordered list supplied to the executor at call time. No runtime type
// inspection anywhere.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A request's named fields, shared between steps through the executor's
/// working copy.
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// Error surfaced by a step implementation. Steps own the message; the
/// executor wraps it with the step name.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StepFailure {
    pub message: String,
}

impl StepFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

/// What one step invocation produced.
///
/// `output` is merged into the working copy for later steps;
/// `meta` is recorded in the context but never merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StepResult {
    pub output: Fields,
    #[serde(default)]
    pub meta: Fields,
}

/// A named, stateless unit of business logic.
///
/// Implementations must be pure with respect to shared process state:
/// each invocation sees only the snapshot it is handed and communicates
/// only through the returned result.
pub trait Step {
    /// The step's name, recorded in the context and the audit trail.
    fn name(&self) -> &str;

    /// Run the step against a snapshot of the working fields.
    fn invoke(&self, input: &Fields) -> Result<StepResult, StepFailure>;
}
