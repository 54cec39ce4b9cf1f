//! Conversation history export (JSON, plain text, Markdown).

use crate::agent::{ConversationTurn, Role};
use crate::error::Result;
use serde::Serialize;

const TITLE: &str = "AI Research Agent - Conversation History";

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Txt,
    Md,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "json" => Ok(ExportFormat::Json),
            "txt" => Ok(ExportFormat::Txt),
            "md" => Ok(ExportFormat::Md),
            _ => Err("Format must be json, txt, or md".to_string()),
        }
    }
}

#[derive(Serialize)]
struct HistoryExport<'a> {
    history: &'a [ConversationTurn],
}

impl ExportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Txt => "text/plain; charset=utf-8",
            ExportFormat::Md => "text/markdown; charset=utf-8",
        }
    }

    /// Render the full history. Output depends only on the turns.
    pub fn render(&self, history: &[ConversationTurn]) -> Result<String> {
        let body = match self {
            ExportFormat::Json => serde_json::to_string(&HistoryExport { history })?,
            ExportFormat::Txt => {
                let mut content = format!("{}\n{}\n\n", TITLE, "=".repeat(50));
                for turn in history {
                    let role = match turn.role {
                        Role::Human => "USER",
                        Role::Assistant => "ASSISTANT",
                    };
                    content.push_str(&format!("{}:\n{}\n\n", role, turn.content));
                }
                content
            }
            ExportFormat::Md => {
                let mut content = format!("# {}\n\n", TITLE);
                for turn in history {
                    let role = match turn.role {
                        Role::Human => "**User**",
                        Role::Assistant => "**Assistant**",
                    };
                    content.push_str(&format!("{}:\n\n{}\n\n---\n\n", role, turn.content));
                }
                content
            }
        };
        Ok(body)
    }
}
