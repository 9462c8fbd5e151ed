//! # acp-engine
//!
//! Step abstraction and pipeline executor for the agent control plane.
//!
//! A [`Step`] is a named, stateless unit of business logic consuming and
//! producing request fields. The [`PipelineExecutor`] threads an ordered
//! list of steps over a working copy of the request, recording every
//! step's output and merging it forward so later steps see earlier
//! results.
//!
//! ## Key invariants
//!
//! - **Executor owns the merge**: steps receive an immutable snapshot and
//!   return a new result; only the executor mutates the working copy.
//! - **Last writer wins**: a field written by two steps keeps the later
//!   step's value.
//! - **Fail fast**: a failing step aborts the run; no partial context is
//!   ever returned as success.
//! - **Deterministic**: given deterministic steps, two runs over the same
//!   input produce identical contexts.

pub mod context;
pub mod error;
pub mod executor;
pub mod step;
pub mod steps;

pub use context::{PipelineContext, StepRecord};
pub use error::EngineError;
pub use executor::PipelineExecutor;
pub use step::{Fields, Step, StepFailure, StepResult};
pub use steps::{default_steps, ClassifierStep, EchoStep, ResolverStep};
