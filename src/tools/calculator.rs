//! Calculator tool.

use super::expression::{evaluate, format_number, EvalError};
use super::{Tool, ToolOutput};
use crate::config::Prompts;
use crate::error::{ResearchError, Result};
use crate::llm::{ChatModel, Usage};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Evaluates arithmetic. Word problems are first translated into an
/// expression by the model.
pub struct CalculatorTool {
    model: Arc<dyn ChatModel>,
    template: String,
}

impl CalculatorTool {
    pub fn new(model: Arc<dyn ChatModel>, template: &str) -> Self {
        Self {
            model,
            template: template.to_string(),
        }
    }

    async fn translate(&self, question: &str) -> Result<(String, Usage)> {
        let prompt = Prompts::render_one(&self.template, "question", question);
        let (reply, usage) = self.model.predict(&prompt).await?;
        Ok((strip_fences(&reply), usage))
    }
}

/// Remove markdown code fences and surrounding whitespace.
fn strip_fences(reply: &str) -> String {
    reply
        .trim()
        .trim_start_matches("```text")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
        .to_string()
}

#[async_trait]
impl Tool for CalculatorTool {
    fn name(&self) -> &str {
        "Calculator"
    }

    fn description(&self) -> &str {
        "Perform mathematical calculations and data analysis. Input should be a math expression."
    }

    async fn invoke(&self, input: &str) -> Result<ToolOutput> {
        match evaluate(input) {
            Ok(value) => {
                return Ok(ToolOutput::text(format!("Answer: {}", format_number(value))));
            }
            // undefined or oversized input; the model cannot fix that
            Err(e @ (EvalError::NotFinite | EvalError::TooComplex(_))) => {
                return Err(ResearchError::tool(self.name(), e.to_string()));
            }
            Err(_) => {}
        }

        let (expression, usage) = self.translate(input).await?;
        debug!("Calculator translated '{}' into '{}'", input, expression);

        let value = evaluate(&expression).map_err(|e| {
            ResearchError::tool(self.name(), format!("cannot evaluate '{}': {}", expression, e))
        })?;

        Ok(ToolOutput {
            content: format!("Answer: {}", format_number(value)),
            usage,
        })
    }
}
