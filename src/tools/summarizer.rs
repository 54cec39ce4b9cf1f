//! Structured summarization tool.

use super::{Tool, ToolOutput};
use crate::config::Prompts;
use crate::error::Result;
use crate::llm::ChatModel;
use async_trait::async_trait;
use std::sync::Arc;

/// Returned, without calling the model, for inputs below [`MIN_INPUT_CHARS`].
pub const SUMMARY_REFUSAL: &str = "Text too short to summarize.";

const MIN_INPUT_CHARS: usize = 100;
const MAX_INPUT_CHARS: usize = 3000;

/// Summarizes research text into findings, insights and implications.
pub struct SummarizerTool {
    model: Arc<dyn ChatModel>,
    template: String,
}

impl SummarizerTool {
    pub fn new(model: Arc<dyn ChatModel>, template: &str) -> Self {
        Self {
            model,
            template: template.to_string(),
        }
    }
}

#[async_trait]
impl Tool for SummarizerTool {
    fn name(&self) -> &str {
        "IntelligentSummarizer"
    }

    fn description(&self) -> &str {
        "Use this to create structured summaries of research content. Input should be the text to summarize."
    }

    async fn invoke(&self, input: &str) -> Result<ToolOutput> {
        if input.chars().count() < MIN_INPUT_CHARS {
            return Ok(ToolOutput::text(SUMMARY_REFUSAL));
        }

        let text: String = input.chars().take(MAX_INPUT_CHARS).collect();
        let prompt = Prompts::render_one(&self.template, "text", &text);
        let (content, usage) = self.model.predict(&prompt).await?;

        Ok(ToolOutput { content, usage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::{self, ScriptedModel};
    use crate::llm::{ChatMessage, Usage};

    fn tool(model: Arc<ScriptedModel>) -> SummarizerTool {
        SummarizerTool::new(model, &Prompts::default().summarize)
    }

    #[tokio::test]
    async fn test_short_input_refused_without_model_call() {
        let model = Arc::new(ScriptedModel::default());
        let output = tool(model.clone()).invoke("too short").await.unwrap();
        assert_eq!(output.content, SUMMARY_REFUSAL);
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_long_input_truncated_and_summarized() {
        let model = Arc::new(ScriptedModel::new(vec![mock::text(
            "1. Main Findings ...",
            Usage::new(900, 100),
        )]));
        let input = "x".repeat(5000);
        let output = tool(model.clone()).invoke(&input).await.unwrap();

        assert_eq!(output.content, "1. Main Findings ...");
        assert_eq!(output.usage.total_tokens, 1000);
        assert_eq!(model.calls(), 1);

        let (messages, tools) = model.request(0);
        assert!(tools.is_empty());
        match &messages[0] {
            ChatMessage::User(prompt) => {
                assert!(prompt.contains(&"x".repeat(3000)));
                assert!(!prompt.contains(&"x".repeat(3001)));
                assert!(prompt.contains("Main Findings"));
            }
            other => panic!("Expected user prompt, got {:?}", other),
        }
    }
}
