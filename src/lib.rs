//! Kaiwa - Interactive AI chat client library
//!
//! This library provides the core functionality for the Kaiwa chat
//! client: conversation session state and persistence, the completion
//! gateway relay with its HTTP surface, provider abstractions, and
//! configuration.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `session`: conversation state machine, saved histories, persistence
//! - `gateway`: stateless completion relay and the `/api/chat` endpoint
//! - `providers`: completion provider abstraction and implementations
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use kaiwa::config::Config;
//! use kaiwa::gateway::CompletionGateway;
//! use kaiwa::providers::create_provider;
//! use kaiwa::session::{ChatSession, HistorySlot};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let provider = create_provider(&config.provider)?;
//!     let gateway = Arc::new(CompletionGateway::new(provider, None));
//!     let mut session = ChatSession::new(gateway, HistorySlot::open_default()?);
//!     session.append_exchange("Hello!").await?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod gateway;
pub mod providers;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use error::{KaiwaError, Result};
pub use gateway::CompletionGateway;
pub use session::{ChatHistory, ChatSession, HistorySlot, Message, Role, SubmitOutcome};
