//! Ask command implementation.

use crate::agent::ResearchAgent;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the ask command.
pub async fn run_ask(question: &str, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Ask, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'research-agent doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let agent = ResearchAgent::from_settings(&settings)?;

    let spinner = Output::spinner("Researching...");
    let result = agent.query(question).await;
    spinner.finish_and_clear();

    if !result.success {
        Output::error(&result.answer);
        anyhow::bail!("query failed");
    }

    println!("\n{}\n", result.answer);

    if let Some(metadata) = result.metadata {
        Output::kv("Tokens", &metadata.tokens.to_string());
        Output::kv("Cost", &metadata.cost);
        Output::kv("Time", &metadata.time);
    }

    Ok(())
}
