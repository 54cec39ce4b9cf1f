//! Tools command: list what the agent can call.

use crate::cli::Output;
use crate::config::{Prompts, Settings};
use crate::llm::{ChatModel, OpenAIChatModel};
use crate::tools::{Tool, ToolRegistry};
use std::sync::Arc;

/// Build the standard registry without requiring an API key; listing tools
/// never calls the model.
fn catalog(settings: &Settings) -> anyhow::Result<ToolRegistry> {
    let model: Arc<dyn ChatModel> = Arc::new(OpenAIChatModel::unverified(&settings.llm)?);
    let prompts = Prompts::with_agent_system(settings.agent.system_prompt.as_deref());
    Ok(ToolRegistry::standard(settings, model, &prompts)?)
}

pub fn run_tools(settings: &Settings) -> anyhow::Result<()> {
    let tools = catalog(settings)?;

    Output::header(&format!("Tools ({})", tools.len()));
    println!();
    for tool in tools.iter() {
        Output::tool(tool.name(), tool.description());
    }

    Ok(())
}
