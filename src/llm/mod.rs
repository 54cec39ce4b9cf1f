//! Chat model abstraction.
//!
//! The agent loop and the model-backed tools talk to the remote model
//! only through [`ChatModel`], so tests can drive them with a scripted stub.

#[cfg(test)]
pub(crate) mod mock;
mod openai;

pub use openai::{create_client_with_timeout, require_api_key, OpenAIChatModel, API_KEY_VAR};

use crate::config::Pricing;
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Token usage reported by the model API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

impl Usage {
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }

    /// Accumulate another usage into this one.
    pub fn merge(&mut self, other: &Usage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.total_tokens += other.total_tokens;
    }

    /// Estimated cost in USD.
    pub fn cost(&self, pricing: &Pricing) -> f64 {
        (self.prompt_tokens as f64 / 1_000_000.0) * pricing.input_per_million
            + (self.completion_tokens as f64 / 1_000_000.0) * pricing.output_per_million
    }
}

/// A function call requested by the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallRequest {
    pub id: String,
    pub name: String,
    /// Raw JSON arguments as sent by the model.
    pub arguments: String,
}

/// Function schema advertised to the model.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: serde_json::Value,
}

/// Message in a chat completion request.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatMessage {
    System(String),
    User(String),
    Assistant {
        content: Option<String>,
        tool_calls: Vec<ToolCallRequest>,
    },
    Tool {
        call_id: String,
        content: String,
    },
}

impl ChatMessage {
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant {
            content: Some(content.into()),
            tool_calls: Vec::new(),
        }
    }
}

/// One model response.
#[derive(Debug, Clone, Default)]
pub struct ModelReply {
    pub content: Option<String>,
    pub tool_calls: Vec<ToolCallRequest>,
    pub usage: Usage,
}

/// A chat-completion model with function calling.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Model identifier, for logging.
    fn model_name(&self) -> &str;

    /// Send a conversation, optionally advertising tools.
    async fn chat(&self, messages: &[ChatMessage], tools: &[ToolSpec]) -> Result<ModelReply>;

    /// Single-prompt completion without tools.
    async fn predict(&self, prompt: &str) -> Result<(String, Usage)> {
        let reply = self
            .chat(&[ChatMessage::User(prompt.to_string())], &[])
            .await?;
        Ok((reply.content.unwrap_or_default(), reply.usage))
    }
}
