//! Web search tool backed by the Tavily search API.

use super::{Tool, ToolOutput};
use crate::config::SearchSettings;
use crate::error::{ResearchError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Searches the web, scoped to preferred academic domains.
pub struct WebSearchTool {
    http: reqwest::Client,
    settings: SearchSettings,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: u32,
    search_depth: &'a str,
    include_answer: bool,
    include_raw_content: bool,
    include_domains: &'a [String],
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    results: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(default)]
    title: String,
    url: String,
    #[serde(default)]
    content: String,
}

impl WebSearchTool {
    pub fn new(http: reqwest::Client, settings: SearchSettings) -> Self {
        Self { http, settings }
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Result<SearchResponse> {
        let api_key = self.settings.resolved_api_key().ok_or_else(|| {
            ResearchError::tool(self.name(), "TAVILY_API_KEY not set")
        })?;

        let url = format!("{}/search", self.settings.base_url.trim_end_matches('/'));
        let body = SearchRequest {
            api_key: &api_key,
            query,
            max_results: self.settings.max_results,
            search_depth: &self.settings.search_depth,
            include_answer: true,
            include_raw_content: false,
            include_domains: &self.settings.include_domains,
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ResearchError::remote("Tavily", e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ResearchError::remote("Tavily", format!("{}: {}", status, text)));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| ResearchError::remote("Tavily", format!("invalid response: {}", e)))?;

        debug!("Tavily returned {} results", parsed.results.len());
        Ok(parsed)
    }
}

fn format_results(response: &SearchResponse) -> String {
    let mut sections = Vec::new();

    if let Some(answer) = response.answer.as_deref().filter(|a| !a.is_empty()) {
        sections.push(format!("Answer: {}", answer));
    }

    let hits = response
        .results
        .iter()
        .enumerate()
        .map(|(i, hit)| format!("{}. {}\n   {}\n   {}", i + 1, hit.title, hit.url, hit.content))
        .collect::<Vec<_>>();
    if !hits.is_empty() {
        sections.push(hits.join("\n\n"));
    }

    if sections.is_empty() {
        "No search results found.".to_string()
    } else {
        sections.join("\n\n")
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "WebSearch"
    }

    fn description(&self) -> &str {
        "Search the web for recent information. Useful for finding papers, articles, and current research. Prioritizes academic sources."
    }

    async fn invoke(&self, input: &str) -> Result<ToolOutput> {
        let response = self.search(input).await?;
        Ok(ToolOutput::text(format_results(&response)))
    }
}
