//! AI Research Agent
//!
//! A thin HTTP service around a tool-calling chat model. Questions go to the
//! model together with a fixed set of research tools; answers come back with
//! token usage and an estimated cost. The service keeps one shared
//! conversation in memory, aggregate metrics, and an append-only feedback log.
//!
//! # Architecture
//!
//! - `config` - Settings file and prompt templates
//! - `llm` - Chat model abstraction and the OpenAI backend
//! - `tools` - Web search, Wikipedia, calculator, summarizer, citation, comparison
//! - `agent` - The bounded tool-calling loop, memory and metrics
//! - `server` - axum router exposing the agent over HTTP
//! - `cli` - Command line front-end
//!
//! # Example
//!
//! ```rust,no_run
//! use research_agent::agent::ResearchAgent;
//! use research_agent::config::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let agent = ResearchAgent::from_settings(&settings)?;
//!
//!     let result = agent.query("What is retrieval-augmented generation?").await;
//!     println!("{}", result.answer);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod server;
pub mod tools;

pub use error::{ResearchError, Result};
