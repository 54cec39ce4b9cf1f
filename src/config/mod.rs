//! Configuration module for the research agent.
//!
//! Handles loading application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::Prompts;
pub use settings::{
    AgentSettings, LlmSettings, Pricing, SearchSettings, ServerSettings, Settings,
    WikipediaSettings,
};
