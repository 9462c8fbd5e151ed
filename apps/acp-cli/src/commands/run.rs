// run.rs — Gate and execute an intake request.

use std::fs;
use std::io::Read;

use anyhow::Context;

use acp_engine::default_steps;
use acp_runtime::{ControlPlaneConfig, Orchestrator};

pub fn execute(config: &ControlPlaneConfig, request_arg: &str, budget_ms: Option<u64>) -> anyhow::Result<()> {
    let raw = if request_arg == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("reading request from stdin")?;
        buffer
    } else {
        fs::read_to_string(request_arg)
            .with_context(|| format!("reading request file '{}'", request_arg))?
    };

    let request: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&raw).context("request must be a JSON object")?;

    let mut config = config.clone();
    if budget_ms.is_some() {
        config.step_budget_ms = budget_ms;
    }

    let orchestrator = Orchestrator::new(&config)?;
    let outcome = orchestrator.run(&default_steps(), &request)?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
