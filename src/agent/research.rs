//! The research agent facade: executor plus memory and metrics bookkeeping.

use super::memory::{ConversationMemory, ConversationTurn};
use super::metrics::{format_cost, format_seconds, Metrics, MetricsSnapshot};
use super::runner::AgentExecutor;
use crate::config::{Pricing, Prompts, Settings};
use crate::error::{ErrorKind, Result};
use crate::llm::{ChatModel, OpenAIChatModel};
use crate::tools::ToolRegistry;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};

/// Per-query details returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryMetadata {
    pub tokens: u64,
    pub cost: String,
    pub time: String,
    pub conversation_turns: usize,
}

/// Outcome of [`ResearchAgent::query`]. Failures are values, not errors.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub answer: String,
    pub success: bool,
    pub metadata: Option<QueryMetadata>,
    pub error_kind: Option<ErrorKind>,
}

#[derive(Default)]
struct AgentState {
    memory: ConversationMemory,
    metrics: Metrics,
}

/// Owns one executor, its conversation memory and cumulative metrics.
///
/// Bookkeeping is serialized by a single lock that is never held across
/// the model call, so concurrent queries overlap except while committing.
pub struct ResearchAgent {
    executor: AgentExecutor,
    pricing: Pricing,
    state: Mutex<AgentState>,
}

impl ResearchAgent {
    pub fn new(executor: AgentExecutor, pricing: Pricing) -> Self {
        Self {
            executor,
            pricing,
            state: Mutex::new(AgentState::default()),
        }
    }

    /// Build the standard agent: OpenAI model plus the full toolset.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let model: Arc<dyn ChatModel> = Arc::new(OpenAIChatModel::new(&settings.llm)?);
        let prompts = Prompts::with_agent_system(settings.agent.system_prompt.as_deref());
        let tools = ToolRegistry::standard(settings, model.clone(), &prompts)?;

        let executor = AgentExecutor::new(model, tools)
            .with_prompts(&prompts)
            .with_max_iterations(settings.agent.max_iterations);

        info!(
            "Research agent ready: model {}, {} tools",
            executor.model_name(),
            executor.tools().len()
        );

        Ok(Self::new(executor, settings.llm.pricing))
    }

    pub fn tools(&self) -> &ToolRegistry {
        self.executor.tools()
    }

    /// Answer a question, recording the exchange and updating metrics on success.
    #[instrument(skip(self), fields(question = %question))]
    pub async fn query(&self, question: &str) -> QueryResult {
        let start = Instant::now();

        let history = self.state.lock().await.memory.turns().to_vec();

        let response = match self.executor.run(&history, question).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Query failed: {}", e);
                return QueryResult {
                    answer: format!("Error: {}", e),
                    success: false,
                    metadata: None,
                    error_kind: Some(e.kind()),
                };
            }
        };

        let elapsed = start.elapsed().as_secs_f64();
        let tokens = response.usage.total_tokens;
        let cost = response.usage.cost(&self.pricing);

        let conversation_turns = {
            let mut state = self.state.lock().await;
            state.memory.push_exchange(question, &response.content);
            state.metrics.record(elapsed, tokens, cost);
            state.memory.exchanges()
        };

        info!(
            "Query answered in {:.2}s, {} tokens, {} tool call(s)",
            elapsed,
            tokens,
            response.tool_calls.len()
        );

        QueryResult {
            answer: response.content,
            success: true,
            metadata: Some(QueryMetadata {
                tokens,
                cost: format_cost(cost),
                time: format_seconds(elapsed),
                conversation_turns,
            }),
            error_kind: None,
        }
    }

    pub async fn get_metrics(&self) -> MetricsSnapshot {
        let state = self.state.lock().await;
        state.metrics.snapshot(state.memory.len())
    }

    /// Raw counters.
    pub async fn metrics(&self) -> Metrics {
        self.state.lock().await.metrics.clone()
    }

    pub async fn get_conversation_history(&self) -> Vec<ConversationTurn> {
        self.state.lock().await.memory.turns().to_vec()
    }

    /// Forget the conversation. Metrics are kept.
    pub async fn clear_memory(&self) {
        self.state.lock().await.memory.clear();
    }
}
