//! Pre-flight checks before contacting remote services.
//!
//! Fails fast with a readable message instead of erroring on the first
//! model call.

use crate::config::Settings;
use crate::error::{ResearchError, Result};
use crate::llm::require_api_key;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// A one-shot question needs the model key.
    Ask,
    /// Serving builds the agent lazily, so only the static assets matter.
    Serve,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Ask => require_api_key(),
        Operation::Serve => {
            if settings.server.port == 0 {
                return Err(ResearchError::Config("server.port must not be 0".to_string()));
            }
            Ok(())
        }
    }
}

/// Non-fatal problems worth printing before starting.
pub fn warnings(settings: &Settings) -> Vec<String> {
    let mut warnings = Vec::new();
    if require_api_key().is_err() {
        warnings.push("OPENAI_API_KEY not set; queries will fail until it is.".to_string());
    }
    if settings.search.resolved_api_key().is_none() {
        warnings.push("TAVILY_API_KEY not set; the WebSearch tool will fail.".to_string());
    }
    if !settings.static_dir().join("index.html").exists() {
        warnings.push(format!(
            "No index.html in {}; / will serve a placeholder page.",
            settings.static_dir().display()
        ));
    }
    warnings
}
