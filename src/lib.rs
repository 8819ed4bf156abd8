//! # llmbot
//!
//! Chat-bot integration layer for a locally hosted Ollama server.
//!
//! ## Features
//!
//! - **Keyed rate limiting**: sliding-window admission per user, group or feature
//! - **Retry with backoff**: explicit retry policies around model and database calls
//! - **Per-key locking**: serialized ledger updates per member, with idle eviction
//! - **Bounded concurrency**: one task runner caps in-flight generation and ledger work
//! - **Streaming with fallback**: per-line timeouts, partial acceptance and a
//!   non-streaming fallback request
//! - **Conversation memory**: opt-in, bounded, expiring per-user history
//! - **Points ledger**: daily sign-in, streaks, backfill and leaderboards on SQLite
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use llmbot::{BotRuntime, Config, InboundEvent};
//! use llmbot::messaging::ConsoleMessenger;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/llmbot.yaml").await?;
//!     let runtime = BotRuntime::build(config, Arc::new(ConsoleMessenger::new())).await?;
//!     runtime.start().await;
//!
//!     runtime.handle(InboundEvent::private("10001", "hello!")).await;
//!
//!     runtime.shutdown().await;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod bot;
pub mod config;
pub mod core;
pub mod features;
pub mod messaging;
pub mod monitoring;
pub mod storage;
pub mod utils;

// Re-export main types
pub use bot::{BotRuntime, Dispatcher, InboundEvent};
pub use config::Config;
pub use utils::error::{BotError, Result};

// Export the request-governance core
pub use core::{LockManager, RateLimiter, StreamingReader, TaskRunner, TaskStats};
pub use utils::error::{RetryConfig, RetryPolicy};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
