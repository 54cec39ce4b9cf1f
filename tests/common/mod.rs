//! Shared fixtures: a deterministic chat model and router helpers.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt as _;
use research_agent::agent::{AgentCell, AgentExecutor, ResearchAgent};
use research_agent::config::Pricing;
use research_agent::llm::{ChatMessage, ChatModel, ModelReply, ToolCallRequest, ToolSpec, Usage};
use research_agent::server::{build_router, AppState, FeedbackLog};
use research_agent::tools::{CitationTool, ToolKind, ToolRegistry};
use research_agent::ResearchError;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

/// Usage reported for every stub model call.
pub const CALL_USAGE: Usage = Usage {
    prompt_tokens: 100,
    completion_tokens: 20,
    total_tokens: 120,
};

/// Picks tools by name from the question text:
///
/// - `cite <source>` calls `CitationGenerator` with `<source>`
/// - anything containing `explode` fails like an unreachable API
/// - everything else is answered directly with `Answer to: <question>`
#[derive(Default)]
pub struct RoutingModel {
    calls: AtomicUsize,
}

impl RoutingModel {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn reply(content: String) -> ModelReply {
    ModelReply {
        content: Some(content),
        tool_calls: Vec::new(),
        usage: CALL_USAGE,
    }
}

#[async_trait]
impl ChatModel for RoutingModel {
    fn model_name(&self) -> &str {
        "routing-stub"
    }

    async fn chat(
        &self,
        messages: &[ChatMessage],
        _tools: &[ToolSpec],
    ) -> research_agent::Result<ModelReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match messages.last() {
            Some(ChatMessage::Tool { content, .. }) => {
                let first_line = content.lines().next().unwrap_or_default();
                Ok(reply(format!("Based on tool: {}", first_line)))
            }
            Some(ChatMessage::User(question)) if question.contains("explode") => Err(
                ResearchError::remote("OpenAI", "connection reset by peer"),
            ),
            Some(ChatMessage::User(question)) => match question.strip_prefix("cite ") {
                Some(source) => Ok(ModelReply {
                    content: None,
                    tool_calls: vec![ToolCallRequest {
                        id: "call_1".to_string(),
                        name: "CitationGenerator".to_string(),
                        arguments: serde_json::json!({ "input": source }).to_string(),
                    }],
                    usage: CALL_USAGE,
                }),
                None => Ok(reply(format!("Answer to: {}", question))),
            },
            _ => Ok(reply("Nothing to answer".to_string())),
        }
    }
}

/// Router over a ready agent driven by [`RoutingModel`]. Feedback and static
/// files live under `dir`.
pub fn app(dir: &Path) -> (Router, Arc<RoutingModel>) {
    let model = Arc::new(RoutingModel::default());
    let tools = ToolRegistry::new(vec![ToolKind::Citation(CitationTool::new())]);
    let agent = ResearchAgent::new(AgentExecutor::new(model.clone(), tools), Pricing::default());

    let state = AppState::new(
        AgentCell::ready(agent),
        FeedbackLog::new(dir.join("feedback.jsonl")),
        dir.join("static"),
    );
    (build_router(Arc::new(state)), model)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> TestResponse {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

/// POST `body` verbatim as `application/json`, valid or not.
pub async fn post_raw(app: &Router, uri: &str, body: &str) -> TestResponse {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

pub async fn post_empty(app: &Router, uri: &str) -> TestResponse {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

async fn send(app: &Router, req: Request<Body>) -> TestResponse {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = resp.into_body().collect().await.unwrap().to_bytes().to_vec();
    TestResponse {
        status,
        headers,
        body,
    }
}
