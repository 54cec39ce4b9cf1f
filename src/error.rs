//! Error types for the research agent.

use serde::Serialize;
use thiserror::Error;

/// Library-level error type for research agent operations.
#[derive(Error, Debug)]
pub enum ResearchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("Tool '{tool}' failed: {details}")]
    Tool { tool: String, details: String },

    #[error("{service} request failed: {details}")]
    RemoteService { service: String, details: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Unknown(String),
}

/// Coarse classification of a [`ResearchError`], reported to API callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Tool,
    RemoteService,
    Config,
    Io,
    Unknown,
}

impl ResearchError {
    /// Build a tool failure.
    pub fn tool(tool: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Tool {
            tool: tool.into(),
            details: details.into(),
        }
    }

    /// Build a failure of an external service (model API, search API, ...).
    pub fn remote(service: impl Into<String>, details: impl Into<String>) -> Self {
        Self::RemoteService {
            service: service.into(),
            details: details.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Tool { .. } => ErrorKind::Tool,
            Self::RemoteService { .. } | Self::Http(_) => ErrorKind::RemoteService,
            Self::Config(_) | Self::TomlParse(_) => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
            Self::Json(_) | Self::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// The underlying message without the classification prefix.
    pub fn details(&self) -> String {
        match self {
            Self::Tool { details, .. } | Self::RemoteService { details, .. } => details.clone(),
            Self::Config(msg) | Self::Validation(msg) | Self::Unknown(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for research agent operations.
pub type Result<T> = std::result::Result<T, ResearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            ResearchError::Validation("Query too short".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(ResearchError::tool("Calculator", "boom").kind(), ErrorKind::Tool);
        assert_eq!(
            ResearchError::remote("Tavily", "401").kind(),
            ErrorKind::RemoteService
        );
        assert_eq!(ResearchError::Unknown("?".into()).kind(), ErrorKind::Unknown);
    }

    #[test]
    fn test_details_preserves_message() {
        let err = ResearchError::tool("Calculator", "division by zero");
        assert_eq!(err.details(), "division by zero");
        assert_eq!(err.to_string(), "Tool 'Calculator' failed: division by zero");
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::RemoteService).unwrap();
        assert_eq!(json, "\"remote_service\"");
    }
}
