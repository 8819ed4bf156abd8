//! Chat backend abstraction

use crate::core::ollama::ChatRequest;
use crate::utils::error::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;
use std::time::Duration;

/// Stream of raw response lines
pub type LineStream = BoxStream<'static, Result<String>>;

/// Model server operations the reader relies on
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Start a streaming chat request; items are newline-delimited JSON lines
    async fn open_stream(&self, request: &ChatRequest, timeout: Duration) -> Result<LineStream>;

    /// Run a non-streaming chat request and return the reply text
    async fn complete(&self, request: &ChatRequest, timeout: Duration) -> Result<String>;
}
