//! HTTP API over the research agent.
//!
//! Every route shares one [`AppState`]; the agent inside it is built on the
//! first request that needs it.

mod error;
mod export;
mod feedback;
mod handlers;

pub use error::ApiError;
pub use export::ExportFormat;
pub use feedback::{FeedbackLog, FeedbackRecord};

use crate::agent::{AgentCell, ResearchAgent};
use crate::config::Settings;
use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Shared application state.
pub struct AppState {
    pub agent: AgentCell,
    pub feedback: FeedbackLog,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(agent: AgentCell, feedback: FeedbackLog, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            agent,
            feedback,
            static_dir: static_dir.into(),
        }
    }

    /// State whose agent is built from `settings` on first use.
    pub fn from_settings(settings: &Settings) -> Self {
        let agent_settings = settings.clone();
        let agent = AgentCell::new(move || ResearchAgent::from_settings(&agent_settings));

        Self::new(
            agent,
            FeedbackLog::new(settings.feedback_log_path()),
            settings.static_dir(),
        )
    }
}

/// Build the router with all endpoints and a permissive CORS policy.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::home))
        .route("/docs", get(handlers::docs))
        .route("/api/ask", get(handlers::ask_get).post(handlers::ask_post))
        .route("/api/metrics", get(handlers::metrics))
        .route("/api/history", get(handlers::history))
        .route("/api/history/clear", post(handlers::clear_history))
        .route("/api/export/{format}", get(handlers::export_history))
        .route("/api/feedback", post(handlers::feedback))
        .route("/api/health", get(handlers::health))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(host: &str, port: u16, state: Arc<AppState>) -> crate::Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, build_router(state)).await?;
    Ok(())
}

/// Local wall-clock time with microseconds, e.g. `2024-05-01T12:30:00.123456`.
pub fn timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_shape() {
        let ts = timestamp();
        assert_eq!(ts.len(), 26);
        assert_eq!(&ts[10..11], "T");
        assert_eq!(&ts[19..20], ".");
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, "%Y-%m-%dT%H:%M:%S%.6f").is_ok());
    }
}
