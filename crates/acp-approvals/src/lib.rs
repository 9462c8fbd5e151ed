//! # acp-approvals
//!
//! Append-only register of human approval decisions.
//!
//! Each [`ApprovalRecord`] references an audit record by id and captures
//! who decided, what they decided, and why. The register never verifies
//! that the referenced audit record exists — that check belongs to the
//! orchestrator before it calls in here.
//!
//! ## Key invariants
//!
//! - **Append-only**: decisions are recorded, never edited or removed.
//! - **Strict decisions**: only "approved" and "rejected" parse; anything
//!   else is refused with a descriptive error before any write.
//! - **Scan-on-read**: lookups scan the durable file at request time; no
//!   index is maintained.

pub mod error;
pub mod record;
pub mod register;

pub use error::ApprovalError;
pub use record::{ApprovalDecision, ApprovalRecord};
pub use register::ApprovalRegister;
