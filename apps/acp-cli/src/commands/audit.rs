// audit.rs — Inspect the audit trail.
//
// Read-only: uses the tolerant scan, so a corrupt line in the log never
// blocks inspection.

use clap::Subcommand;

use acp_audit::AuditLog;
use acp_runtime::ControlPlaneConfig;

#[derive(Subcommand)]
pub enum AuditCommands {
    /// Print one audit record by id.
    Show { audit_id: uuid::Uuid },
    /// Print the most recent audit records, one JSON line each.
    Tail {
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,
    },
}

pub fn execute(command: &AuditCommands, config: &ControlPlaneConfig) -> anyhow::Result<()> {
    match command {
        AuditCommands::Show { audit_id } => {
            let records = AuditLog::read_all(&config.audit_log)?;
            match records.into_iter().find(|record| record.audit_id == *audit_id) {
                Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
                None => anyhow::bail!("no audit record found for id '{}'", audit_id),
            }
        }
        AuditCommands::Tail { count } => {
            let records = AuditLog::read_all(&config.audit_log)?;
            let start = records.len().saturating_sub(*count);
            for record in &records[start..] {
                println!("{}", serde_json::to_string(record)?);
            }
        }
    }
    Ok(())
}
