//! # acp-runtime
//!
//! The control-plane orchestrator: the only layer that composes the
//! policy gate, the pipeline executor, the audit log, and the approval
//! register — and the only layer allowed to decide user-visible status
//! strings and what gets persisted.
//!
//! Per-request state machine:
//!
//! ```text
//! Received ──evaluate──▶ Blocked | NeedsApproval | Succeeded | Failed
//! NeedsApproval ──register──▶ Approved | Rejected   (out of band)
//! NeedsApproval + Approved ──resume──▶ Succeeded
//! any sanitized record ──replay──▶ Replayed
//! ```
//!
//! ## Key invariants
//!
//! - The pipeline only ever runs on a **sanitized** request — the
//!   caller's original is hashed for the audit trail, never executed.
//! - A gate refusal is not an error: it is a successful decision
//!   persisted as `Blocked`.
//! - Replay re-executes history: the stored sanitized request, not the
//!   caller's current input, insulated from an evolving evaluator.

pub mod config;
pub mod error;
pub mod orchestrator;

pub use config::ControlPlaneConfig;
pub use error::RuntimeError;
pub use orchestrator::{Orchestrator, RunOutcome};
