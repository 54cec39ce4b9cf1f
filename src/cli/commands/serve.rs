//! Serve command: run the HTTP API and web frontend.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::server::{self, AppState};
use std::sync::Arc;

/// Run the HTTP API server.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    mut settings: Settings,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(port) = port {
        settings.server.port = port;
    }

    preflight::check(Operation::Serve, &settings)?;

    let state = Arc::new(AppState::from_settings(&settings));
    let addr = format!("{}:{}", settings.server.host, settings.server.port);

    Output::header("AI Research Agent API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Frontend", "GET  /");
    Output::kv("API docs", "GET  /docs");
    Output::kv("Ask", "GET  /api/ask?query=...  |  POST /api/ask");
    Output::kv("Metrics", "GET  /api/metrics");
    Output::kv("History", "GET  /api/history");
    Output::kv("Clear history", "POST /api/history/clear");
    Output::kv("Export", "GET  /api/export/{json|txt|md}");
    Output::kv("Feedback", "POST /api/feedback");
    Output::kv("Health", "GET  /api/health");
    println!();
    for warning in preflight::warnings(&settings) {
        Output::warning(&warning);
    }
    Output::info("Press Ctrl+C to stop the server.");

    server::serve(&settings.server.host, settings.server.port, state).await?;

    Ok(())
}
