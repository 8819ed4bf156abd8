//! Core functionality for the bot
//!
//! Request governance (rate limiting, per-key locking, bounded concurrency),
//! the Ollama client and streaming reader, availability monitoring and
//! conversation memory.

pub mod conversation; // Per-user chat memory
pub mod filter;
pub mod health; // Model server availability
pub mod lock_manager;
pub mod ollama;
pub mod rate_limiter; // Sliding-window limits per key
pub mod registry;
pub mod streaming;
pub mod task_runner;

pub use conversation::{ContextStatus, ConversationStore};
pub use filter::ContentFilter;
pub use health::{AvailabilityMonitor, AvailabilityProbe};
pub use lock_manager::{LockManager, LockManagerConfig};
pub use ollama::OllamaClient;
pub use rate_limiter::RateLimiter;
pub use registry::{ExpiringRegistry, RegistryConfig};
pub use streaming::{ChatBackend, GenerationOutcome, ResponseSource, StreamingReader};
pub use task_runner::{TaskRunner, TaskStats};
