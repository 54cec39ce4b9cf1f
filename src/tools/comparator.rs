//! Comparative analysis tool.

use super::{Tool, ToolOutput};
use crate::config::Prompts;
use crate::error::Result;
use crate::llm::ChatModel;
use async_trait::async_trait;
use std::sync::Arc;

/// Compares concepts or sources: similarities, differences, use-case fit.
pub struct ComparatorTool {
    model: Arc<dyn ChatModel>,
    template: String,
}

impl ComparatorTool {
    pub fn new(model: Arc<dyn ChatModel>, template: &str) -> Self {
        Self {
            model,
            template: template.to_string(),
        }
    }
}

#[async_trait]
impl Tool for ComparatorTool {
    fn name(&self) -> &str {
        "ComparativeAnalyzer"
    }

    fn description(&self) -> &str {
        "Compare and contrast multiple concepts, sources, or approaches. Input should describe what to compare."
    }

    async fn invoke(&self, input: &str) -> Result<ToolOutput> {
        let prompt = Prompts::render_one(&self.template, "items", input);
        let (content, usage) = self.model.predict(&prompt).await?;
        Ok(ToolOutput { content, usage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock::{self, ScriptedModel};
    use crate::llm::{ChatMessage, Usage};

    #[tokio::test]
    async fn test_compare_renders_items_into_prompt() {
        let model = Arc::new(ScriptedModel::new(vec![mock::text(
            "Similarities: both are languages",
            Usage::new(40, 10),
        )]));
        let tool = ComparatorTool::new(model.clone(), &Prompts::default().compare);

        let output = tool.invoke("Rust vs Go").await.unwrap();
        assert_eq!(output.content, "Similarities: both are languages");
        assert_eq!(output.usage, Usage::new(40, 10));

        let (messages, _) = model.request(0);
        assert!(matches!(&messages[0], ChatMessage::User(p) if p.contains("Rust vs Go")));
    }
}
