//! Citation formatting tool.

use super::{Tool, ToolOutput};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Local};

const VERIFY_NOTE: &str = "Note: Always verify source credibility and publication date.";

/// Stamps supplied source details with a generation time and a verification note.
pub struct CitationTool {
    clock: fn() -> DateTime<Local>,
}

impl CitationTool {
    pub fn new() -> Self {
        Self { clock: Local::now }
    }

    /// Use a fixed clock instead of the wall clock.
    pub fn with_clock(clock: fn() -> DateTime<Local>) -> Self {
        Self { clock }
    }

    pub fn format_citation(&self, source_info: &str) -> String {
        let timestamp = (self.clock)().format("%Y-%m-%d %H:%M");
        format!(
            "[Citation generated at {}]\n{}\n\n{}",
            timestamp, source_info, VERIFY_NOTE
        )
    }
}

impl Default for CitationTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for CitationTool {
    fn name(&self) -> &str {
        "CitationGenerator"
    }

    fn description(&self) -> &str {
        "Generate academic-style citations from source information. Input should be source details."
    }

    async fn invoke(&self, input: &str) -> Result<ToolOutput> {
        Ok(ToolOutput::text(self.format_citation(input)))
    }
}
