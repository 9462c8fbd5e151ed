// register.rs — Append-only JSONL approvals log.
//
// Same write discipline as the audit log: one record per line, appended
// and flushed under a mutex so concurrent decisions never interleave.
// Lookups scan the durable file from the start, skipping unparseable
// lines.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use uuid::Uuid;

use crate::error::ApprovalError;
use crate::record::{ApprovalDecision, ApprovalRecord};

/// The durable approval register.
pub struct ApprovalRegister {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl ApprovalRegister {
    /// Open (or create) the register at the given path, creating parent
    /// directories as needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ApprovalError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| ApprovalError::OpenFailed {
                    path: path.clone(),
                    source,
                })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| ApprovalError::OpenFailed {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Record a decision: derive the approval id, stamp it, append it
    /// durably, and return the stored record.
    pub fn record(
        &self,
        audit_id: Uuid,
        decision: ApprovalDecision,
        approved_by: &str,
        reason: &str,
    ) -> Result<ApprovalRecord, ApprovalError> {
        let record = ApprovalRecord::new(audit_id, decision, approved_by, reason);
        let json = serde_json::to_string(&record)?;

        let mut writer = self.writer.lock().map_err(|_| ApprovalError::LockPoisoned)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;
        drop(writer);

        tracing::info!(audit_id = %audit_id, decision = %record.decision, by = %record.approved_by, "approval recorded");
        Ok(record)
    }

    /// Every decision on file for an audit id, in append order.
    pub fn find_for_audit(&self, audit_id: Uuid) -> Result<Vec<ApprovalRecord>, ApprovalError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path).map_err(|source| ApprovalError::OpenFailed {
            path: self.path.clone(),
            source,
        })?;
        let reader = BufReader::new(file);

        let mut matches = Vec::new();
        for (line_number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<ApprovalRecord>(&line) {
                Ok(record) if record.audit_id == audit_id => matches.push(record),
                Ok(_) => {}
                Err(error) => {
                    tracing::warn!(line = line_number + 1, %error, "skipping unparseable approval line");
                }
            }
        }

        Ok(matches)
    }

    /// Path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
