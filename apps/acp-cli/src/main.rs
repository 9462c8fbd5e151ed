//! # acp-cli
//!
//! Command-line collaborator for the agent control plane:
//! - `acp run` — gate an intake request and run the standard pipeline
//! - `acp approve` — record a human decision for a parked request
//! - `acp resume` — execute a parked request once approved
//! - `acp replay` — re-execute a past sanitized request from the log
//! - `acp audit show/tail` — inspect the audit trail
//!
//! All governance logic lives in the library crates; this binary only
//! parses arguments, builds the configuration once, and prints results.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use acp_runtime::ControlPlaneConfig;

/// Agent control plane CLI — gate, run, audit, and replay intake requests.
#[derive(Parser)]
#[command(name = "acp", version, about)]
struct Cli {
    /// Root directory for control-plane state (defaults to current directory).
    #[arg(long, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Gate an intake request and run the standard pipeline.
    Run {
        /// Path to a JSON request file, or "-" to read stdin.
        #[arg(long)]
        request: String,
        /// Wall-clock pipeline budget in milliseconds.
        #[arg(long)]
        budget_ms: Option<u64>,
    },
    /// Record a human decision for a parked audit record.
    Approve {
        audit_id: uuid::Uuid,
        /// "approved" or "rejected".
        #[arg(long)]
        decision: String,
        /// Who is deciding.
        #[arg(long = "by")]
        approved_by: String,
        /// Free-form justification.
        #[arg(long, default_value = "")]
        reason: String,
    },
    /// Re-execute a past sanitized request from the audit log.
    Replay { audit_id: uuid::Uuid },
    /// Run a parked request once its approval is on file.
    Resume { audit_id: uuid::Uuid },
    /// Inspect the audit trail.
    Audit {
        #[command(subcommand)]
        command: commands::audit::AuditCommands,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = ControlPlaneConfig::for_root(&cli.root);
    tracing::debug!(root = %cli.root.display(), "control-plane state root");

    match &cli.command {
        Commands::Run { request, budget_ms } => commands::run::execute(&config, request, *budget_ms),
        Commands::Approve {
            audit_id,
            decision,
            approved_by,
            reason,
        } => commands::approve::execute(&config, *audit_id, decision, approved_by, reason),
        Commands::Replay { audit_id } => commands::replay::execute(&config, *audit_id),
        Commands::Resume { audit_id } => commands::resume::execute(&config, *audit_id),
        Commands::Audit { command } => commands::audit::execute(command, &config),
    }
}
