//! Lazily-built, process-wide agent handle.

use super::research::ResearchAgent;
use crate::error::{ResearchError, Result};
use std::sync::Arc;
use tokio::sync::OnceCell;

type Factory = dyn Fn() -> Result<ResearchAgent> + Send + Sync;

/// Builds the agent on first use and hands out the same instance afterwards.
///
/// Concurrent first callers wait on a single build. A failed build is not
/// cached; the next caller tries again.
pub struct AgentCell {
    cell: OnceCell<Arc<ResearchAgent>>,
    factory: Box<Factory>,
}

impl AgentCell {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<ResearchAgent> + Send + Sync + 'static,
    {
        Self {
            cell: OnceCell::new(),
            factory: Box::new(factory),
        }
    }

    /// A cell holding an already built agent.
    pub fn ready(agent: ResearchAgent) -> Self {
        Self {
            cell: OnceCell::new_with(Some(Arc::new(agent))),
            factory: Box::new(|| {
                Err(ResearchError::Unknown(
                    "agent factory called on a ready cell".to_string(),
                ))
            }),
        }
    }

    pub async fn get(&self) -> Result<Arc<ResearchAgent>> {
        self.cell
            .get_or_try_init(|| async { (self.factory)().map(Arc::new) })
            .await
            .cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }
}
