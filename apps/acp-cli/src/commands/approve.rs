// approve.rs — Record a human decision for a parked audit record.

use uuid::Uuid;

use acp_runtime::{ControlPlaneConfig, Orchestrator};

pub fn execute(
    config: &ControlPlaneConfig,
    audit_id: Uuid,
    decision: &str,
    approved_by: &str,
    reason: &str,
) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::new(config)?;
    let record = orchestrator.approve(audit_id, decision, approved_by, reason)?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
