//! Streaming reader implementation

use super::backend::{ChatBackend, LineStream};
use super::types::{GenerationOutcome, ResponseSource, StreamingConfig};
use crate::core::filter::ContentFilter;
use crate::core::ollama::{ChatRequest, ChatResponse};
use crate::utils::error::{BotError, ErrorCategory, Result};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// How the line loop stopped
enum StreamEnd {
    /// Completion signal or end of stream
    Finished,
    /// Stalled or broke with text already accumulated
    Partial,
    /// Stalled before any text
    Stalled,
}

/// Reads chat completions from a [`ChatBackend`]
///
/// The reader holds no per-request state, so one instance serves any number
/// of concurrent requests.
pub struct StreamingReader {
    backend: Arc<dyn ChatBackend>,
    config: StreamingConfig,
    filter: Arc<ContentFilter>,
}

impl StreamingReader {
    /// Create a new reader
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        config: StreamingConfig,
        filter: Arc<ContentFilter>,
    ) -> Self {
        Self {
            backend,
            config,
            filter,
        }
    }

    pub fn config(&self) -> &StreamingConfig {
        &self.config
    }

    /// Generate a reply by streaming, with partial acceptance and fallback
    pub async fn generate(&self, request: &ChatRequest) -> Result<GenerationOutcome> {
        let request_id = Uuid::new_v4();
        let started = Instant::now();
        let deadline = started + self.config.request_timeout;
        debug!(%request_id, model = %request.model, "Starting streamed generation");

        let opened = tokio::time::timeout(
            self.config.request_timeout,
            self.backend
                .open_stream(&request.with_stream(true), self.config.request_timeout),
        )
        .await;

        let (end, text) = match opened {
            Ok(Ok(stream)) => self.read_lines(request_id, stream, deadline).await?,
            Ok(Err(e)) if e.category() == ErrorCategory::Timeout => {
                debug!(%request_id, "Opening the stream timed out: {}", e);
                (StreamEnd::Stalled, String::new())
            }
            Ok(Err(e)) => return Err(e),
            Err(_) => (StreamEnd::Stalled, String::new()),
        };

        let (text, source) = match end {
            StreamEnd::Finished => (text, ResponseSource::Stream),
            StreamEnd::Partial => {
                warn!(
                    %request_id,
                    chars = text.chars().count(),
                    "Stream stalled, using partial response"
                );
                (text, ResponseSource::Partial)
            }
            StreamEnd::Stalled => {
                warn!(%request_id, "Stream produced nothing, falling back to a single request");
                let text = self
                    .request_once(&request.with_stream(false), self.config.fallback_timeout)
                    .await?;
                (text, ResponseSource::Fallback)
            }
        };

        info!(
            %request_id,
            source = ?source,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Generation finished"
        );

        Ok(GenerationOutcome {
            text: self.filter.apply(&text),
            source,
        })
    }

    /// One non-streaming request with its own timeout
    pub async fn complete(&self, request: &ChatRequest, timeout: Duration) -> Result<GenerationOutcome> {
        let text = self
            .request_once(&request.with_stream(false), timeout)
            .await?;
        Ok(GenerationOutcome {
            text: self.filter.apply(&text),
            source: ResponseSource::Complete,
        })
    }

    async fn request_once(&self, request: &ChatRequest, timeout: Duration) -> Result<String> {
        match tokio::time::timeout(timeout, self.backend.complete(request, timeout)).await {
            Ok(result) => result,
            Err(_) => Err(BotError::Timeout(format!(
                "Non-streaming request timed out after {:?}",
                timeout
            ))),
        }
    }

    async fn read_lines(
        &self,
        request_id: Uuid,
        mut stream: LineStream,
        deadline: Instant,
    ) -> Result<(StreamEnd, String)> {
        let mut accumulated = String::new();

        let end = loop {
            let wait = self
                .config
                .line_timeout
                .min(deadline.saturating_duration_since(Instant::now()));

            let line = match tokio::time::timeout(wait, stream.next()).await {
                Ok(Some(Ok(line))) => line,
                Ok(Some(Err(e)))
                    if accumulated.is_empty() && e.category() == ErrorCategory::Timeout =>
                {
                    debug!(%request_id, "Stream read timed out before any text: {}", e);
                    break StreamEnd::Stalled;
                }
                Ok(Some(Err(e))) => {
                    if accumulated.is_empty() {
                        return Err(e);
                    }
                    warn!(%request_id, "Stream broke after partial output: {}", e);
                    break StreamEnd::Partial;
                }
                Ok(None) => break StreamEnd::Finished,
                Err(_) if accumulated.is_empty() => break StreamEnd::Stalled,
                Err(_) => break StreamEnd::Partial,
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<ChatResponse>(line) {
                Ok(chunk) => {
                    if let Some(content) = chunk.content() {
                        accumulated.push_str(content);
                    }
                    if chunk.done {
                        break StreamEnd::Finished;
                    }
                }
                Err(e) => {
                    debug!(%request_id, "Skipping malformed stream line: {}", e);
                }
            }
        };

        Ok((end, accumulated))
    }
}
