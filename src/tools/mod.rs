//! Tools the research agent may call.
//!
//! Every tool is a named text-in/text-out function with a description the
//! model reads to decide when to call it. The set is closed: [`ToolKind`]
//! enumerates it and [`ToolRegistry`] holds the instances for one agent.

mod calculator;
mod citation;
mod comparator;
pub mod expression;
mod summarizer;
mod web_search;
mod wikipedia;

pub use calculator::CalculatorTool;
pub use citation::CitationTool;
pub use comparator::ComparatorTool;
pub use summarizer::{SummarizerTool, SUMMARY_REFUSAL};
pub use web_search::WebSearchTool;
pub use wikipedia::WikipediaTool;

use crate::config::{Prompts, Settings};
use crate::error::{ResearchError, Result};
use crate::llm::{ChatModel, ToolSpec, Usage};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Text produced by a tool, plus any model usage it incurred.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolOutput {
    pub content: String,
    pub usage: Usage,
}

impl ToolOutput {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: Usage::default(),
        }
    }
}

/// Uniform tool capability.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model uses to call the tool.
    fn name(&self) -> &str;

    /// Natural-language description shown to the model.
    fn description(&self) -> &str;

    /// Run the tool on a single text input.
    async fn invoke(&self, input: &str) -> Result<ToolOutput>;

    /// Function schema advertised to the model.
    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "input": {
                        "type": "string",
                        "description": "Input text for the tool"
                    }
                },
                "required": ["input"]
            }),
        }
    }
}

/// The closed set of tools.
pub enum ToolKind {
    WebSearch(WebSearchTool),
    Wikipedia(WikipediaTool),
    Calculator(CalculatorTool),
    Summarizer(SummarizerTool),
    Citation(CitationTool),
    Comparator(ComparatorTool),
}

impl ToolKind {
    fn inner(&self) -> &dyn Tool {
        match self {
            ToolKind::WebSearch(t) => t,
            ToolKind::Wikipedia(t) => t,
            ToolKind::Calculator(t) => t,
            ToolKind::Summarizer(t) => t,
            ToolKind::Citation(t) => t,
            ToolKind::Comparator(t) => t,
        }
    }
}

#[async_trait]
impl Tool for ToolKind {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn description(&self) -> &str {
        self.inner().description()
    }

    async fn invoke(&self, input: &str) -> Result<ToolOutput> {
        self.inner().invoke(input).await
    }
}

/// Ordered collection of tools available to an agent.
pub struct ToolRegistry {
    tools: Vec<ToolKind>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<ToolKind>) -> Self {
        Self { tools }
    }

    /// The full research toolset: search, encyclopedia, calculator,
    /// summarizer, citation and comparison.
    pub fn standard(
        settings: &Settings,
        model: Arc<dyn ChatModel>,
        prompts: &Prompts,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.llm.timeout_secs))
            .user_agent(concat!("research-agent/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ResearchError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::new(vec![
            ToolKind::WebSearch(WebSearchTool::new(http.clone(), settings.search.clone())),
            ToolKind::Wikipedia(WikipediaTool::new(http, &settings.wikipedia)?),
            ToolKind::Calculator(CalculatorTool::new(model.clone(), &prompts.calculator)),
            ToolKind::Summarizer(SummarizerTool::new(model.clone(), &prompts.summarize)),
            ToolKind::Citation(CitationTool::new()),
            ToolKind::Comparator(ComparatorTool::new(model, &prompts.compare)),
        ]))
    }

    pub fn get(&self, name: &str) -> Option<&ToolKind> {
        self.tools.iter().find(|t| t.name() == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Function schemas for every tool, in registry order.
    pub fn definitions(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|t| t.spec()).collect()
    }

    /// Invoke a tool by name.
    pub async fn invoke(&self, name: &str, input: &str) -> Result<ToolOutput> {
        let tool = self
            .get(name)
            .ok_or_else(|| ResearchError::tool(name, "unknown tool"))?;
        tool.invoke(input).await
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolKind> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Extract the tool input from the model's function-call arguments.
///
/// Tools take a single string. Anything that is not `{"input": "..."}` is
/// tolerated: a lone string field is used as-is, and unparsable arguments
/// are passed through verbatim.
pub fn parse_tool_input(arguments: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(arguments) {
        Ok(serde_json::Value::Object(map)) => {
            if let Some(input) = map.get("input").and_then(|v| v.as_str()) {
                return input.to_string();
            }
            let strings: Vec<&str> = map.values().filter_map(|v| v.as_str()).collect();
            if strings.len() == 1 {
                strings[0].to_string()
            } else {
                arguments.to_string()
            }
        }
        Ok(serde_json::Value::String(s)) => s,
        _ => arguments.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tool_input_object() {
        assert_eq!(parse_tool_input(r#"{"input": "2 + 2"}"#), "2 + 2");
        assert_eq!(parse_tool_input(r#"{"__arg1": "rust"}"#), "rust");
    }

    #[test]
    fn test_parse_tool_input_passthrough() {
        assert_eq!(parse_tool_input("plain text"), "plain text");
        assert_eq!(parse_tool_input(r#""quoted""#), "quoted");
        assert_eq!(
            parse_tool_input(r#"{"a": "x", "b": "y"}"#),
            r#"{"a": "x", "b": "y"}"#
        );
    }

    #[tokio::test]
    async fn test_registry_lookup_and_invoke() {
        let registry = ToolRegistry::new(vec![ToolKind::Citation(CitationTool::new())]);
        assert_eq!(registry.names(), vec!["CitationGenerator"]);
        assert!(registry.get("WebSearch").is_none());

        let output = registry
            .invoke("CitationGenerator", "Doe, J. (2024)")
            .await
            .unwrap();
        assert!(output.content.contains("Doe, J. (2024)"));

        let err = registry.invoke("Nope", "x").await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Tool);
    }

    #[test]
    fn test_definitions_take_single_input() {
        let registry = ToolRegistry::new(vec![ToolKind::Citation(CitationTool::new())]);
        let defs = registry.definitions();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].parameters["required"][0], "input");
    }
}
