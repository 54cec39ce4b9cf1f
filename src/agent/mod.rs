//! Research agent: a tool-calling model loop with conversation memory and
//! usage metrics.
//!
//! [`AgentExecutor`] runs the bounded model/tool loop for one question.
//! [`ResearchAgent`] wraps it with the shared conversation and counters, and
//! [`AgentCell`] builds exactly one agent per process on first use.

mod cell;
mod memory;
mod metrics;
mod research;
mod runner;

pub use cell::AgentCell;
pub use memory::{ConversationMemory, ConversationTurn, Role};
pub use metrics::{format_cost, format_seconds, Metrics, MetricsSnapshot};
pub use research::{QueryMetadata, QueryResult, ResearchAgent};
pub use runner::{AgentExecutor, AgentResponse, ToolCallRecord, DEFAULT_MAX_ITERATIONS};
