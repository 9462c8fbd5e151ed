// replay.rs — Re-execute a past sanitized request from the audit log.

use uuid::Uuid;

use acp_engine::default_steps;
use acp_runtime::{ControlPlaneConfig, Orchestrator};

pub fn execute(config: &ControlPlaneConfig, audit_id: Uuid) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::new(config)?;
    let outcome = orchestrator.replay(audit_id, &default_steps())?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
