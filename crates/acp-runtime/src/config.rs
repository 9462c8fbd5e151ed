// config.rs — Control-plane configuration.
//
// An explicit struct handed to the orchestrator at construction. The
// core never reads the process environment; sourcing this once at
// startup is the bootstrap collaborator's job. The `for_root()`
// constructor generates the standard `.acp/` layout.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the control-plane orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlPlaneConfig {
    /// Path to the append-only audit log.
    pub audit_log: PathBuf,

    /// Path to the append-only approvals log.
    pub approvals_log: PathBuf,

    /// Wall-clock budget applied around pipeline execution, in
    /// milliseconds. `None` runs unbounded.
    #[serde(default)]
    pub step_budget_ms: Option<u64>,
}

impl ControlPlaneConfig {
    /// Create a config with the standard `.acp/` layout under a root.
    pub fn for_root(root: impl AsRef<Path>) -> Self {
        let state_dir = root.as_ref().join(".acp");
        Self {
            audit_log: state_dir.join("audit.jsonl"),
            approvals_log: state_dir.join("approvals.jsonl"),
            step_budget_ms: None,
        }
    }

    /// The pipeline budget as a `Duration`, if configured.
    pub fn step_budget(&self) -> Option<Duration> {
        self.step_budget_ms.map(Duration::from_millis)
    }
}
