// context.rs — Per-run pipeline context.
//
// A PipelineContext is created fresh for one synchronous run, mutated
// only by the executor, and handed back whole. It has no lifecycle
// beyond the invocation that produced it.

use serde::{Deserialize, Serialize};

use crate::step::Fields;

/// One step's recorded contribution to a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepRecord {
    /// The step name, as reported by [`Step::name`](crate::Step::name).
    pub agent: String,
    /// The fields the step produced (merged into the working copy).
    pub output: Fields,
    /// Step-private annotations (recorded, never merged).
    pub meta: Fields,
}

/// The full trace of one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineContext {
    /// The request the run started from, untouched.
    pub initial_input: Fields,
    /// Every step's contribution, in invocation order.
    pub steps: Vec<StepRecord>,
    /// The working copy after the last merge.
    pub final_output: Fields,
}

impl PipelineContext {
    /// The ordered names of the steps that ran.
    pub fn step_names(&self) -> Vec<String> {
        self.steps.iter().map(|record| record.agent.clone()).collect()
    }
}
