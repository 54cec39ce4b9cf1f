//! Scripted [`ChatModel`] for unit tests.

use super::{ChatMessage, ChatModel, ModelReply, ToolCallRequest, ToolSpec, Usage};
use crate::error::{ResearchError, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays queued replies in order and records every request.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<ModelReply>>,
    requests: Mutex<Vec<(Vec<ChatMessage>, Vec<String>)>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<ModelReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Messages and advertised tool names of request `i`.
    pub fn request(&self, i: usize) -> (Vec<ChatMessage>, Vec<String>) {
        self.requests.lock().unwrap()[i].clone()
    }
}

pub fn text(content: &str, usage: Usage) -> ModelReply {
    ModelReply {
        content: Some(content.to_string()),
        tool_calls: Vec::new(),
        usage,
    }
}

pub fn call(id: &str, tool: &str, input: &str, usage: Usage) -> ModelReply {
    ModelReply {
        content: None,
        tool_calls: vec![ToolCallRequest {
            id: id.to_string(),
            name: tool.to_string(),
            arguments: serde_json::json!({ "input": input }).to_string(),
        }],
        usage,
    }
}

#[async_trait]
impl ChatModel for ScriptedModel {
    fn model_name(&self) -> &str {
        "scripted"
    }

    async fn chat(&self, messages: &[ChatMessage], tools: &[ToolSpec]) -> Result<ModelReply> {
        self.requests.lock().unwrap().push((
            messages.to_vec(),
            tools.iter().map(|t| t.name.clone()).collect(),
        ));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ResearchError::remote("OpenAI", "no scripted reply left"))
    }
}
