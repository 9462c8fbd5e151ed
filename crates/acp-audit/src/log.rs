// log.rs — Append-only JSONL audit log.
//
// One JSON object per line. Appends go through a mutex-guarded buffered
// writer and flush before the lock is released, so a record hits the
// file as one whole line and concurrent appends never interleave.
// Reads open the file independently and parse each line on its own,
// skipping anything unparseable — a torn trailing write from a crash
// must not take the whole log down.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use uuid::Uuid;

use crate::error::AuditError;
use crate::record::AuditRecord;

/// An append-only audit log backed by a JSONL file.
pub struct AuditLog {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl AuditLog {
    /// Open (or create) the log at the given path, creating parent
    /// directories as needed. The file is opened in append mode —
    /// existing records are never overwritten.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| AuditError::OpenFailed {
                    path: path.clone(),
                    source,
                })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| AuditError::OpenFailed {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    /// Append one record as one whole line, then flush.
    pub fn append(&self, record: &AuditRecord) -> Result<(), AuditError> {
        // Serialize outside the lock; only the write is exclusive.
        let json = serde_json::to_string(record)?;

        let mut writer = self.writer.lock().map_err(|_| AuditError::LockPoisoned)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;
        drop(writer);

        tracing::info!(audit_id = %record.audit_id, status = %record.status, "audit record appended");
        Ok(())
    }

    /// Find a record by id via a forward scan from the beginning.
    ///
    /// Unparseable lines are skipped; a missing file means no records
    /// have ever been written, which is "not found", not an error.
    pub fn find_by_id(&self, audit_id: Uuid) -> Result<Option<AuditRecord>, AuditError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.path).map_err(|source| AuditError::OpenFailed {
            path: self.path.clone(),
            source,
        })?;
        let reader = BufReader::new(file);

        for (line_number, line) in reader.lines().enumerate() {
            let line = line?;
            match parse_line(&line, line_number) {
                Some(record) if record.audit_id == audit_id => return Ok(Some(record)),
                _ => {}
            }
        }

        Ok(None)
    }

    /// Read every parseable record from a log file, oldest first.
    pub fn read_all(path: impl AsRef<Path>) -> Result<Vec<AuditRecord>, AuditError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(path).map_err(|source| AuditError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);

        let mut records = Vec::new();
        for (line_number, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some(record) = parse_line(&line, line_number) {
                records.push(record);
            }
        }

        Ok(records)
    }

    /// Path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parse one line, warning (not failing) on corruption.
fn parse_line(line: &str, line_number: usize) -> Option<AuditRecord> {
    if line.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(line) {
        Ok(record) => Some(record),
        Err(error) => {
            tracing::warn!(line = line_number + 1, %error, "skipping unparseable audit line");
            None
        }
    }
}
