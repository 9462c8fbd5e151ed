//! # acp-audit
//!
//! Append-only audit log for the agent control plane.
//!
//! Every control-plane decision — blocked, parked for approval,
//! executed, replayed, or failed — is persisted as an [`AuditRecord`] in
//! a JSONL (JSON Lines) file. Each record carries a SHA-256 fingerprint
//! of the original, pre-sanitization request and embeds the full policy
//! decision, including the sanitized copy that makes replay possible.
//!
//! ## Key invariants
//!
//! - **Append-only**: a record, once written, is never edited or removed.
//! - **Whole-line writes**: appends are serialized under a per-log mutex;
//!   readers never observe a half-written record.
//! - **Tolerant reads**: a malformed line is skipped with a warning,
//!   never fatal to the read path.
//! - **No index**: `find_by_id` is a forward scan of the durable file —
//!   the simplicity/consistency trade-off is deliberate at expected
//!   volumes.
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use acp_audit::{AuditLog, AuditRecord, AuditStatus};
//! use acp_policy::Fields;
//!
//! let request = Fields::new();
//! let policy = acp_policy::evaluate(&request);
//! let record = AuditRecord::build(
//!     &request,
//!     vec!["classifier_agent".into()],
//!     policy,
//!     12,
//!     AuditStatus::Succeeded,
//! ).unwrap();
//!
//! let log = AuditLog::open("/tmp/audit.jsonl").unwrap();
//! log.append(&record).unwrap();
//! ```

pub mod error;
pub mod hasher;
pub mod log;
pub mod record;

pub use error::AuditError;
pub use log::AuditLog;
pub use record::{AuditRecord, AuditStatus};
