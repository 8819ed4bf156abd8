//! Ollama model server integration
//!
//! Wire types for `/api/chat` and `/api/tags`, and the HTTP client that
//! implements the chat backend and availability probe.

mod client;
mod types;

pub use client::OllamaClient;
pub use types::{ChatMessage, ChatRequest, ChatResponse, ChatRole, ResponseMessage};
