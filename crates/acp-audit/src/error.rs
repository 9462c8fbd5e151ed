// error.rs — Error types for the audit subsystem.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during audit operations.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Failed to open or create the audit log file.
    #[error("failed to open audit log at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Reading or writing the log file failed.
    #[error("audit log I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A record could not be serialized to a JSON line.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The writer mutex was poisoned by a panicking thread.
    #[error("audit log writer lock poisoned")]
    LockPoisoned,
}
