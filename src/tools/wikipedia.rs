//! Encyclopedic lookup tool backed by the MediaWiki API.

use super::{Tool, ToolOutput};
use crate::config::WikipediaSettings;
use crate::error::{ResearchError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

const NO_RESULTS: &str = "No good Wikipedia Search Result was found";

/// Fetches intro extracts of the best-matching articles.
pub struct WikipediaTool {
    http: reqwest::Client,
    endpoint: Url,
    top_k: u32,
    max_chars: usize,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    query: Option<QueryPages>,
}

#[derive(Debug, Deserialize)]
struct QueryPages {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    title: String,
    #[serde(default)]
    index: u32,
    #[serde(default)]
    extract: String,
}

impl WikipediaTool {
    pub fn new(http: reqwest::Client, settings: &WikipediaSettings) -> Result<Self> {
        let endpoint = Url::parse(&settings.base_url)
            .and_then(|base| base.join("/w/api.php"))
            .map_err(|e| {
                ResearchError::Config(format!(
                    "Invalid Wikipedia base URL '{}': {}",
                    settings.base_url, e
                ))
            })?;

        Ok(Self {
            http,
            endpoint,
            top_k: settings.top_k,
            max_chars: settings.max_chars,
        })
    }

    #[instrument(skip(self))]
    async fn lookup(&self, query: &str) -> Result<Vec<Page>> {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("action", "query")
            .append_pair("format", "json")
            .append_pair("formatversion", "2")
            .append_pair("generator", "search")
            .append_pair("gsrsearch", query)
            .append_pair("gsrlimit", &self.top_k.to_string())
            .append_pair("prop", "extracts")
            .append_pair("exintro", "1")
            .append_pair("explaintext", "1")
            .append_pair("exlimit", "max");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ResearchError::remote("Wikipedia", e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResearchError::remote("Wikipedia", format!("HTTP {}", status)));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| ResearchError::remote("Wikipedia", format!("invalid response: {}", e)))?;

        let mut pages = parsed.query.map(|q| q.pages).unwrap_or_default();
        pages.sort_by_key(|p| p.index);
        debug!("Wikipedia returned {} pages", pages.len());
        Ok(pages)
    }

    fn format_pages(&self, pages: &[Page]) -> String {
        let summaries = pages
            .iter()
            .filter(|p| !p.extract.is_empty())
            .take(self.top_k as usize)
            .map(|p| format!("Page: {}\nSummary: {}", p.title, p.extract))
            .collect::<Vec<_>>();

        if summaries.is_empty() {
            return NO_RESULTS.to_string();
        }

        summaries.join("\n\n").chars().take(self.max_chars).collect()
    }
}

#[async_trait]
impl Tool for WikipediaTool {
    fn name(&self) -> &str {
        "Wikipedia"
    }

    fn description(&self) -> &str {
        "Get comprehensive background information on topics. Good for foundational knowledge and definitions."
    }

    async fn invoke(&self, input: &str) -> Result<ToolOutput> {
        let pages = self.lookup(input).await?;
        Ok(ToolOutput::text(self.format_pages(&pages)))
    }
}
