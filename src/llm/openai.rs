//! OpenAI chat completions backend.

use super::{ChatMessage, ChatModel, ModelReply, ToolCallRequest, ToolSpec, Usage};
use crate::config::LlmSettings;
use crate::error::{ResearchError, Result};
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionTool, ChatCompletionToolType, CreateChatCompletionRequestArgs, FunctionCall,
    FunctionObject,
};
use async_openai::Client;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Create an OpenAI client whose requests time out after `timeout`.
pub fn create_client_with_timeout(timeout: Duration) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ResearchError::Config(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Client::with_config(OpenAIConfig::default()).with_http_client(http_client))
}

/// Environment variable holding the OpenAI API key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Fail with a configuration error unless the OpenAI key is present.
pub fn require_api_key() -> Result<()> {
    match std::env::var(API_KEY_VAR) {
        Ok(key) if !key.trim().is_empty() => Ok(()),
        _ => Err(ResearchError::Config(format!(
            "{} environment variable is not set",
            API_KEY_VAR
        ))),
    }
}

/// [`ChatModel`] backed by the OpenAI chat completions API.
pub struct OpenAIChatModel {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAIChatModel {
    /// Create a model from settings. The API key is read from `OPENAI_API_KEY`.
    pub fn new(settings: &LlmSettings) -> Result<Self> {
        require_api_key()?;
        Self::unverified(settings)
    }

    /// Create a model without checking for the API key. Requests fail at
    /// call time if it is missing.
    pub fn unverified(settings: &LlmSettings) -> Result<Self> {
        Ok(Self {
            client: create_client_with_timeout(Duration::from_secs(settings.timeout_secs))?,
            model: settings.model.clone(),
            temperature: settings.temperature,
        })
    }
}

#[async_trait]
impl ChatModel for OpenAIChatModel {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn chat(&self, messages: &[ChatMessage], tools: &[ToolSpec]) -> Result<ModelReply> {
        let messages = messages
            .iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>>>()?;

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model)
            .messages(messages)
            .temperature(self.temperature);
        if !tools.is_empty() {
            args.tools(tools.iter().map(to_tool).collect::<Vec<_>>());
        }
        let request = args.build().map_err(build_error)?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| ResearchError::remote("OpenAI", e.to_string()))?;

        let usage = response
            .usage
            .as_ref()
            .map(|u| Usage {
                prompt_tokens: u.prompt_tokens as u64,
                completion_tokens: u.completion_tokens as u64,
                total_tokens: u.total_tokens as u64,
            })
            .unwrap_or_default();

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ResearchError::remote("OpenAI", "No response from model"))?;

        let tool_calls = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|call| ToolCallRequest {
                id: call.id,
                name: call.function.name,
                arguments: call.function.arguments,
            })
            .collect::<Vec<_>>();

        debug!(
            "Model {} replied with {} tool call(s), {} tokens",
            self.model,
            tool_calls.len(),
            usage.total_tokens
        );

        Ok(ModelReply {
            content: choice.message.content,
            tool_calls,
            usage,
        })
    }
}

fn build_error(e: async_openai::error::OpenAIError) -> ResearchError {
    ResearchError::Unknown(format!("Invalid model request: {}", e))
}

fn to_tool(spec: &ToolSpec) -> ChatCompletionTool {
    ChatCompletionTool {
        r#type: ChatCompletionToolType::Function,
        function: FunctionObject {
            name: spec.name.clone(),
            description: Some(spec.description.clone()),
            parameters: Some(spec.parameters.clone()),
            strict: None,
        },
    }
}

fn to_request_message(message: &ChatMessage) -> Result<ChatCompletionRequestMessage> {
    let message = match message {
        ChatMessage::System(content) => ChatCompletionRequestSystemMessageArgs::default()
            .content(content.clone())
            .build()
            .map_err(build_error)?
            .into(),
        ChatMessage::User(content) => ChatCompletionRequestUserMessageArgs::default()
            .content(content.clone())
            .build()
            .map_err(build_error)?
            .into(),
        ChatMessage::Assistant {
            content,
            tool_calls,
        } => {
            let mut args = ChatCompletionRequestAssistantMessageArgs::default();
            if let Some(content) = content {
                args.content(content.clone());
            }
            if !tool_calls.is_empty() {
                args.tool_calls(
                    tool_calls
                        .iter()
                        .map(|call| ChatCompletionMessageToolCall {
                            id: call.id.clone(),
                            r#type: ChatCompletionToolType::Function,
                            function: FunctionCall {
                                name: call.name.clone(),
                                arguments: call.arguments.clone(),
                            },
                        })
                        .collect::<Vec<_>>(),
                );
            }
            args.build().map_err(build_error)?.into()
        }
        ChatMessage::Tool { call_id, content } => ChatCompletionRequestToolMessageArgs::default()
            .tool_call_id(call_id.clone())
            .content(content.clone())
            .build()
            .map_err(build_error)?
            .into(),
    };
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assistant_tool_calls_convert() {
        let message = ChatMessage::Assistant {
            content: None,
            tool_calls: vec![ToolCallRequest {
                id: "call_1".to_string(),
                name: "Calculator".to_string(),
                arguments: r#"{"input": "2+2"}"#.to_string(),
            }],
        };
        match to_request_message(&message).unwrap() {
            ChatCompletionRequestMessage::Assistant(msg) => {
                let calls = msg.tool_calls.unwrap();
                assert_eq!(calls.len(), 1);
                assert_eq!(calls[0].function.name, "Calculator");
            }
            other => panic!("Expected assistant message, got {:?}", other),
        }
    }

    #[test]
    fn test_tool_spec_converts_to_function() {
        let spec = ToolSpec {
            name: "Wikipedia".to_string(),
            description: "Background".to_string(),
            parameters: serde_json::json!({"type": "object"}),
        };
        let tool = to_tool(&spec);
        assert_eq!(tool.function.name, "Wikipedia");
        assert_eq!(tool.function.description.as_deref(), Some("Background"));
    }
}
