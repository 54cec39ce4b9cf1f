//! Configuration settings for the research agent.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub agent: AgentSettings,
    pub search: SearchSettings,
    pub wikipedia: WikipediaSettings,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Directory holding `index.html` for the web frontend.
    pub static_dir: String,
    /// Append-only JSON-lines file for user feedback.
    pub feedback_log: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            static_dir: "static".to_string(),
            feedback_log: "feedback.jsonl".to_string(),
        }
    }
}

/// Chat model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Chat completion model.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// HTTP timeout for a single model request, in seconds.
    pub timeout_secs: u64,
    /// Per-token pricing used to estimate query cost.
    pub pricing: Pricing,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.4,
            timeout_secs: 300,
            pricing: Pricing::default(),
        }
    }
}

/// USD price per million tokens.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pricing {
    pub input_per_million: f64,
    pub output_per_million: f64,
}

impl Default for Pricing {
    fn default() -> Self {
        // gpt-4o-mini list price
        Self {
            input_per_million: 0.15,
            output_per_million: 0.60,
        }
    }
}

/// Agent loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Maximum model calls per query before the loop is force-stopped.
    pub max_iterations: usize,
    /// Replaces the built-in system prompt when set.
    pub system_prompt: Option<String>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            max_iterations: 6,
            system_prompt: None,
        }
    }
}

/// Web search (Tavily) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Tavily API key. Falls back to `TAVILY_API_KEY`.
    pub api_key: Option<String>,
    /// Base URL of the Tavily API.
    pub base_url: String,
    /// Number of results to request.
    pub max_results: u32,
    /// Tavily search depth (basic, advanced).
    pub search_depth: String,
    /// Domains the search is scoped to.
    pub include_domains: Vec<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.tavily.com".to_string(),
            max_results: 5,
            search_depth: "advanced".to_string(),
            include_domains: vec![
                "arxiv.org".to_string(),
                "scholar.google.com".to_string(),
                "ieee.org".to_string(),
                "acm.org".to_string(),
            ],
        }
    }
}

impl SearchSettings {
    /// Resolve the API key from config or environment.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var("TAVILY_API_KEY").ok().filter(|k| !k.is_empty()))
    }
}

/// Encyclopedic lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WikipediaSettings {
    /// Base URL of the MediaWiki instance.
    pub base_url: String,
    /// Number of articles to include.
    pub top_k: u32,
    /// Maximum characters returned to the agent.
    pub max_chars: usize,
}

impl Default for WikipediaSettings {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org".to_string(),
            top_k: 3,
            max_chars: 5000,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> crate::error::Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> crate::error::Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("research-agent")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded static asset directory.
    pub fn static_dir(&self) -> PathBuf {
        Self::expand_path(&self.server.static_dir)
    }

    /// Get the expanded feedback log path.
    pub fn feedback_log_path(&self) -> PathBuf {
        Self::expand_path(&self.server.feedback_log)
    }
}
