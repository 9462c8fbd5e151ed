//! # acp-policy
//!
//! Policy gate for the agent control plane.
//!
//! Every intake request passes through [`evaluate`] before any pipeline
//! step runs. The evaluator scans free-text fields for sensitive content,
//! substitutes fixed placeholder tokens, scores the request, and walks a
//! fixed threshold ladder to a [`PolicyAction`].
//!
//! ## Key invariants
//!
//! - **Pure**: `evaluate` performs no I/O and never mutates its input.
//! - **Sanitize always**: a sanitized copy is produced even when the
//!   action is `Block`, so the audit trail can store it on rejection.
//! - **Ladder determines everything**: `allowed` and `requires_approval`
//!   are derived from `action` alone; no other code path sets them.
//! - **Idempotent redaction**: placeholder tokens match no matcher, so
//!   re-evaluating a sanitized request detects nothing further.

pub mod evaluator;
pub mod redaction;

pub use evaluator::{evaluate, Fields, PolicyAction, PolicyDecision};
pub use redaction::{redact_text, RedactionKind};
