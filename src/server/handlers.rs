//! Request handlers for the research API.

use super::error::ApiError;
use super::export::ExportFormat;
use super::feedback::FeedbackRecord;
use super::{timestamp, AppState};
use crate::agent::{ConversationTurn, MetricsSnapshot, QueryMetadata};
use crate::error::ErrorKind;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info};

const MIN_QUERY_CHARS: usize = 3;

const FRONTEND_MISSING: &str = "<html>\
<head><title>AI Research Agent</title></head>\
<body>\
<h1>Error: Frontend not found</h1>\
<p>Please ensure static/index.html exists</p>\
<p>API documentation is available at <a href=\"/docs\">/docs</a></p>\
</body>\
</html>";

const API_DOCS: &str = "<html>\
<head><title>AI Research Agent API</title></head>\
<body>\
<h1>AI Research Agent API</h1>\
<ul>\
<li><code>GET /api/ask?query=...</code> Ask a research question</li>\
<li><code>POST /api/ask</code> Ask with a JSON body <code>{\"query\": \"...\"}</code></li>\
<li><code>GET /api/metrics</code> Usage metrics</li>\
<li><code>GET /api/history</code> Conversation history</li>\
<li><code>POST /api/history/clear</code> Clear conversation history</li>\
<li><code>GET /api/export/{format}</code> Export history as json, txt or md</li>\
<li><code>POST /api/feedback</code> Rate an answer from 1 to 5</li>\
<li><code>GET /api/health</code> Health check</li>\
</ul>\
</body>\
</html>";

// === Request/Response Types ===

#[derive(Deserialize)]
pub(super) struct AskParams {
    #[serde(default)]
    query: String,
}

#[derive(Deserialize)]
pub(super) struct AskRequest {
    query: String,
    /// Accepted for client compatibility; all requests share one conversation.
    #[serde(default)]
    session_id: Option<String>,
}

#[derive(Serialize)]
struct AskResponse {
    status: &'static str,
    query: String,
    answer: String,
    metadata: QueryMetadata,
    timestamp: String,
}

#[derive(Serialize)]
struct MetricsResponse {
    status: &'static str,
    metrics: MetricsSnapshot,
    timestamp: String,
}

#[derive(Serialize)]
struct HistoryResponse {
    status: &'static str,
    history: Vec<ConversationTurn>,
    count: usize,
    timestamp: String,
}

#[derive(Serialize)]
struct ClearResponse {
    status: &'static str,
    message: &'static str,
    timestamp: String,
}

#[derive(Serialize)]
struct MessageResponse {
    status: &'static str,
    message: &'static str,
}

#[derive(Deserialize)]
pub(super) struct FeedbackRequest {
    query: String,
    /// Required from clients but not persisted.
    #[allow(dead_code)]
    response: String,
    rating: i64,
    #[serde(default)]
    feedback: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    timestamp: String,
}

// === Handlers ===

pub(super) async fn home(State(state): State<Arc<AppState>>) -> Response {
    match tokio::fs::read_to_string(state.static_dir.join("index.html")).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            debug!("Frontend not served: {}", e);
            (StatusCode::NOT_FOUND, Html(FRONTEND_MISSING)).into_response()
        }
    }
}

pub(super) async fn docs() -> Html<&'static str> {
    Html(API_DOCS)
}

pub(super) async fn ask_get(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AskParams>,
) -> Result<Response, ApiError> {
    answer(&state, params.query).await
}

pub(super) async fn ask_post(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;
    if let Some(session) = &req.session_id {
        debug!("Ignoring session id {}", session);
    }
    answer(&state, req.query).await
}

/// Shared body of both ask variants.
async fn answer(state: &AppState, query: String) -> Result<Response, ApiError> {
    if query.trim().chars().count() < MIN_QUERY_CHARS {
        return Err(ApiError::validation("Query too short"));
    }

    info!("Query received: {}", preview(&query, 100));

    let agent = state.agent.get().await?;
    let result = agent.query(&query).await;

    match (result.success, result.metadata) {
        (true, Some(metadata)) => {
            info!("Query completed - {} tokens", metadata.tokens);
            Ok(Json(AskResponse {
                status: "success",
                query,
                answer: result.answer,
                metadata,
                timestamp: timestamp(),
            })
            .into_response())
        }
        _ => {
            error!("Query failed: {}", result.answer);
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                result.error_kind.unwrap_or(ErrorKind::Unknown),
                result.answer,
            ))
        }
    }
}

pub(super) async fn metrics(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let agent = state.agent.get().await?;
    let metrics = agent.get_metrics().await;

    Ok(Json(MetricsResponse {
        status: "success",
        metrics,
        timestamp: timestamp(),
    })
    .into_response())
}

pub(super) async fn history(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let agent = state.agent.get().await?;
    let history = agent.get_conversation_history().await;

    Ok(Json(HistoryResponse {
        status: "success",
        count: history.len(),
        history,
        timestamp: timestamp(),
    })
    .into_response())
}

pub(super) async fn clear_history(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let agent = state.agent.get().await?;
    agent.clear_memory().await;
    info!("Conversation history cleared");

    Ok(Json(ClearResponse {
        status: "success",
        message: "Conversation history cleared",
        timestamp: timestamp(),
    })
    .into_response())
}

pub(super) async fn export_history(
    State(state): State<Arc<AppState>>,
    Path(format): Path<String>,
) -> Result<Response, ApiError> {
    let format: ExportFormat = format.parse().map_err(ApiError::validation)?;

    let agent = state.agent.get().await?;
    let history = agent.get_conversation_history().await;
    let body = format.render(&history)?;

    Ok(([(header::CONTENT_TYPE, format.content_type())], body).into_response())
}

pub(super) async fn feedback(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = payload?;
    let rating = u8::try_from(req.rating)
        .ok()
        .filter(|r| (1..=5).contains(r))
        .ok_or_else(|| ApiError::validation("Rating must be between 1 and 5"))?;

    let record = FeedbackRecord {
        query: req.query,
        rating,
        feedback: req.feedback,
        timestamp: timestamp(),
    };
    state.feedback.append(&record).await?;
    info!("Feedback received - Rating: {}/5", rating);

    Ok(Json(MessageResponse {
        status: "success",
        message: "Thank you for your feedback!",
    })
    .into_response())
}

pub(super) async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        service: "AI Research Agent",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: timestamp(),
    })
}

fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
