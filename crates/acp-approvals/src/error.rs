// error.rs — Error types for the approval register.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while recording or reading approvals.
#[derive(Debug, Error)]
pub enum ApprovalError {
    /// The decision string is not one of the accepted values.
    #[error("invalid approval decision '{0}': must be 'approved' or 'rejected'")]
    InvalidDecision(String),

    /// Failed to open or create the approvals log file.
    #[error("failed to open approvals log at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading or writing the log file failed.
    #[error("approvals log I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized to a JSON line.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The writer mutex was poisoned by a panicking thread.
    #[error("approvals log writer lock poisoned")]
    LockPoisoned,
}
