// executor.rs — Synchronous, ordered pipeline execution.
//
// The executor is the only component that touches the working copy:
// each step gets an immutable snapshot, and on success its output is
// merged back (last writer wins). An optional wall-clock budget is
// checked between steps; a breach aborts the run like any other
// pipeline failure. A step that blocks forever cannot be preempted
// here — bounding individual steps is the step implementation's job.

use std::time::{Duration, Instant};

use crate::context::{PipelineContext, StepRecord};
use crate::error::EngineError;
use crate::step::{Fields, Step};

/// Runs an ordered list of steps over a shared working copy.
#[derive(Debug, Clone, Default)]
pub struct PipelineExecutor {
    budget: Option<Duration>,
}

impl PipelineExecutor {
    /// An executor with no execution budget.
    pub fn new() -> Self {
        Self { budget: None }
    }

    /// An executor that aborts once `budget` wall-clock time has elapsed.
    pub fn with_budget(budget: Duration) -> Self {
        Self { budget: Some(budget) }
    }

    /// Run every step in order against a working copy of `initial`.
    ///
    /// On success the returned context holds the per-step trace and the
    /// final merged output. On the first step failure or budget breach
    /// the run aborts; nothing partial is returned.
    pub fn run(&self, steps: &[Box<dyn Step>], initial: &Fields) -> Result<PipelineContext, EngineError> {
        let started = Instant::now();
        let mut working = initial.clone();
        let mut records = Vec::with_capacity(steps.len());

        for step in steps {
            if let Some(budget) = self.budget {
                let elapsed = started.elapsed();
                if elapsed > budget {
                    return Err(EngineError::BudgetExceeded {
                        elapsed_ms: elapsed.as_millis() as u64,
                        budget_ms: budget.as_millis() as u64,
                    });
                }
            }

            let result = step.invoke(&working).map_err(|source| EngineError::StepFailed {
                step: step.name().to_string(),
                source,
            })?;

            tracing::debug!(step = step.name(), outputs = result.output.len(), "step completed");

            records.push(StepRecord {
                agent: step.name().to_string(),
                output: result.output.clone(),
                meta: result.meta,
            });

            // Later steps see earlier output; collisions keep the later value.
            for (key, value) in result.output {
                working.insert(key, value);
            }
        }

        Ok(PipelineContext {
            initial_input: initial.clone(),
            steps: records,
            final_output: working,
        })
    }
}
