// resume.rs — Execute a parked request once its approval is on file.

use uuid::Uuid;

use acp_engine::default_steps;
use acp_runtime::{ControlPlaneConfig, Orchestrator};

pub fn execute(config: &ControlPlaneConfig, audit_id: Uuid) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::new(config)?;
    let outcome = orchestrator.resume(audit_id, &default_steps())?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
