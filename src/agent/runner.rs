//! Agent executor with a bounded tool calling loop.

use super::memory::ConversationTurn;
use crate::config::Prompts;
use crate::error::Result;
use crate::llm::{ChatMessage, ChatModel, ToolCallRequest, Usage};
use crate::tools::{parse_tool_input, Tool, ToolRegistry};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default cap on model calls per query.
pub const DEFAULT_MAX_ITERATIONS: usize = 6;

/// Runs the model/tool loop for a single question.
pub struct AgentExecutor {
    model: Arc<dyn ChatModel>,
    tools: ToolRegistry,
    max_iterations: usize,
    system_prompt: String,
    final_answer_prompt: String,
}

impl AgentExecutor {
    /// Create an executor with the given model and tools.
    pub fn new(model: Arc<dyn ChatModel>, tools: ToolRegistry) -> Self {
        let prompts = Prompts::default();
        Self {
            model,
            tools,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            system_prompt: prompts.agent_system,
            final_answer_prompt: prompts.force_final_answer,
        }
    }

    /// Use prompts other than the defaults.
    pub fn with_prompts(mut self, prompts: &Prompts) -> Self {
        self.system_prompt = prompts.agent_system.clone();
        self.final_answer_prompt = prompts.force_final_answer.clone();
        self
    }

    /// Set maximum iterations for the agent loop.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    /// Answer `question` given the prior conversation.
    ///
    /// Stops at the first reply without tool calls. When the iteration cap
    /// is reached the model is asked once more, without tools, for its best
    /// final answer.
    pub async fn run(&self, history: &[ConversationTurn], question: &str) -> Result<AgentResponse> {
        let mut messages: Vec<ChatMessage> = Vec::with_capacity(history.len() + 2);
        messages.push(ChatMessage::System(self.system_prompt.clone()));
        messages.extend(history.iter().map(ChatMessage::from));
        messages.push(ChatMessage::User(question.to_string()));

        let specs = self.tools.definitions();
        let mut usage = Usage::default();
        let mut tool_calls_made = Vec::new();

        for iteration in 1..=self.max_iterations {
            debug!("Agent iteration {}", iteration);

            let reply = self.model.chat(&messages, &specs).await?;
            usage.merge(&reply.usage);

            if reply.tool_calls.is_empty() {
                return Ok(AgentResponse {
                    content: reply.content.unwrap_or_default(),
                    tool_calls: tool_calls_made,
                    iterations: iteration,
                    usage,
                    stopped_early: false,
                });
            }

            messages.push(ChatMessage::Assistant {
                content: reply.content.clone(),
                tool_calls: reply.tool_calls.clone(),
            });

            for tool_call in &reply.tool_calls {
                let record = self.execute_tool_call(tool_call).await?;
                usage.merge(&record.usage);
                messages.push(ChatMessage::Tool {
                    call_id: tool_call.id.clone(),
                    content: record.result.clone(),
                });
                tool_calls_made.push(record);
            }
        }

        warn!(
            "Agent stopped after {} iterations, generating final answer",
            self.max_iterations
        );
        messages.push(ChatMessage::User(self.final_answer_prompt.clone()));
        let reply = self.model.chat(&messages, &[]).await?;
        usage.merge(&reply.usage);

        Ok(AgentResponse {
            content: reply.content.unwrap_or_default(),
            tool_calls: tool_calls_made,
            iterations: self.max_iterations,
            usage,
            stopped_early: true,
        })
    }

    /// Execute a single tool call and return a record of it.
    ///
    /// Unknown tool names are reported back to the model; a failing tool
    /// aborts the run.
    async fn execute_tool_call(&self, tool_call: &ToolCallRequest) -> Result<ToolCallRecord> {
        let name = &tool_call.name;
        let input = parse_tool_input(&tool_call.arguments);

        let Some(tool) = self.tools.get(name) else {
            warn!("Model requested unknown tool: {}", name);
            return Ok(ToolCallRecord {
                name: name.clone(),
                input,
                result: format!(
                    "{} is not a valid tool, try one of [{}].",
                    name,
                    self.tools.names().join(", ")
                ),
                usage: Usage::default(),
            });
        };

        info!("Agent calling tool: {} with input: {}", name, input);
        let output = tool.invoke(&input).await?;

        Ok(ToolCallRecord {
            name: name.clone(),
            input,
            result: output.content,
            usage: output.usage,
        })
    }
}

/// Response from an agent run.
#[derive(Debug)]
pub struct AgentResponse {
    /// The final response content from the agent.
    pub content: String,
    /// Record of all tool calls made during execution.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of iterations (LLM calls) used.
    pub iterations: usize,
    /// Usage across every model call, tools included.
    pub usage: Usage,
    /// Whether the iteration cap forced the final answer.
    pub stopped_early: bool,
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Name of the tool called.
    pub name: String,
    /// Input passed to the tool.
    pub input: String,
    /// Result returned by the tool.
    pub result: String,
    pub usage: Usage,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::llm::mock::{self, ScriptedModel};
    use crate::tools::{CalculatorTool, CitationTool, ToolKind};

    fn executor(model: Arc<ScriptedModel>) -> AgentExecutor {
        let tools = ToolRegistry::new(vec![
            ToolKind::Calculator(CalculatorTool::new(
                model.clone(),
                &Prompts::default().calculator,
            )),
            ToolKind::Citation(CitationTool::new()),
        ]);
        AgentExecutor::new(model, tools)
    }

    #[test]
    fn test_tool_call_record_display() {
        let record = ToolCallRecord {
            name: "Calculator".to_string(),
            input: "2 + 2".to_string(),
            result: "Answer: 4".to_string(),
            usage: Usage::default(),
        };
        assert_eq!(format!("{}", record), "Calculator(2 + 2)");
    }

    #[tokio::test]
    async fn test_direct_answer_single_iteration() {
        let model = Arc::new(ScriptedModel::new(vec![mock::text(
            "Rust is a language.",
            Usage::new(50, 10),
        )]));
        let history = vec![
            ConversationTurn::human("earlier"),
            ConversationTurn::assistant("reply"),
        ];

        let response = executor(model.clone())
            .run(&history, "What is Rust?")
            .await
            .unwrap();

        assert_eq!(response.content, "Rust is a language.");
        assert_eq!(response.iterations, 1);
        assert_eq!(response.usage.total_tokens, 60);
        assert!(!response.stopped_early);

        let (messages, tools) = model.request(0);
        assert_eq!(tools, vec!["Calculator", "CitationGenerator"]);
        assert!(matches!(&messages[0], ChatMessage::System(_)));
        assert_eq!(messages[1], ChatMessage::User("earlier".to_string()));
        assert_eq!(messages[2], ChatMessage::assistant("reply"));
        assert_eq!(messages[3], ChatMessage::User("What is Rust?".to_string()));
    }

    #[tokio::test]
    async fn test_tool_result_fed_back_to_model() {
        let model = Arc::new(ScriptedModel::new(vec![
            mock::call("call_1", "Calculator", "6 * 7", Usage::new(20, 5)),
            mock::text("The answer is 42.", Usage::new(30, 5)),
        ]));

        let response = executor(model.clone()).run(&[], "6 times 7?").await.unwrap();

        assert_eq!(response.content, "The answer is 42.");
        assert_eq!(response.iterations, 2);
        assert_eq!(response.tool_calls.len(), 1);
        assert_eq!(response.tool_calls[0].result, "Answer: 42");
        assert_eq!(response.usage.total_tokens, 60);

        let (messages, _) = model.request(1);
        assert_eq!(
            messages.last(),
            Some(&ChatMessage::Tool {
                call_id: "call_1".to_string(),
                content: "Answer: 42".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_unknown_tool_reported_to_model() {
        let model = Arc::new(ScriptedModel::new(vec![
            mock::call("call_1", "Telepathy", "read minds", Usage::default()),
            mock::text("Sorry.", Usage::default()),
        ]));

        let response = executor(model.clone()).run(&[], "hello there").await.unwrap();
        assert_eq!(response.content, "Sorry.");
        assert_eq!(
            response.tool_calls[0].result,
            "Telepathy is not a valid tool, try one of [Calculator, CitationGenerator]."
        );
    }

    #[tokio::test]
    async fn test_iteration_cap_forces_final_answer() {
        let mut replies: Vec<_> = (0..DEFAULT_MAX_ITERATIONS)
            .map(|i| mock::call(&format!("call_{}", i), "Calculator", "1 + 1", Usage::new(10, 1)))
            .collect();
        replies.push(mock::text("Best effort answer.", Usage::new(10, 1)));
        let model = Arc::new(ScriptedModel::new(replies));

        let response = executor(model.clone()).run(&[], "loop forever").await.unwrap();

        assert!(response.stopped_early);
        assert_eq!(response.content, "Best effort answer.");
        assert_eq!(response.iterations, DEFAULT_MAX_ITERATIONS);
        assert_eq!(response.tool_calls.len(), DEFAULT_MAX_ITERATIONS);
        assert_eq!(model.calls(), DEFAULT_MAX_ITERATIONS + 1);
        assert_eq!(response.usage.total_tokens, 11 * (DEFAULT_MAX_ITERATIONS as u64 + 1));

        let (messages, tools) = model.request(DEFAULT_MAX_ITERATIONS);
        assert!(tools.is_empty());
        assert_eq!(
            messages.last(),
            Some(&ChatMessage::User(Prompts::default().force_final_answer))
        );
    }

    #[tokio::test]
    async fn test_failing_tool_aborts_run() {
        let model = Arc::new(ScriptedModel::new(vec![mock::call(
            "call_1",
            "Calculator",
            "1 / 0",
            Usage::default(),
        )]));

        let err = executor(model).run(&[], "divide").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Tool);
    }
}
