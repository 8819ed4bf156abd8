//! HTTP client for the Ollama server

use super::types::{ChatRequest, ChatResponse};
use crate::core::health::AvailabilityProbe;
use crate::core::streaming::{ChatBackend, LineStream};
use crate::utils::error::{BotError, Result};
use crate::utils::truncate_chars;
use async_trait::async_trait;
use futures::StreamExt;
use std::time::Duration;
use tracing::debug;

/// Longest upstream error body kept in error messages
const MAX_ERROR_BODY: usize = 200;

/// Client for `/api/chat` and `/api/tags`
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    probe_timeout: Duration,
}

impl OllamaClient {
    /// Create a new client for the server at `base_url`
    pub fn new(base_url: impl Into<String>, probe_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| BotError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            probe_timeout,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    async fn post_chat(&self, request: &ChatRequest, timeout: Duration) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(self.endpoint("chat"))
            .timeout(timeout)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BotError::Upstream {
                status: status.as_u16(),
                message: truncate_chars(&body, MAX_ERROR_BODY),
            });
        }

        Ok(response)
    }
}

/// Split a byte stream into trimmed lines, keeping partial lines across chunks
fn ndjson_lines<S>(bytes: S) -> LineStream
where
    S: futures::Stream<Item = reqwest::Result<bytes::Bytes>> + Send + 'static,
{
    let stream = async_stream::stream! {
        let mut buffer: Vec<u8> = Vec::new();
        futures::pin_mut!(bytes);

        while let Some(chunk) = bytes.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    yield Err(BotError::from(e));
                    return;
                }
            };
            buffer.extend_from_slice(&chunk);

            while let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=pos).collect();
                yield Ok(String::from_utf8_lossy(&line).trim().to_string());
            }
        }

        if !buffer.is_empty() {
            yield Ok(String::from_utf8_lossy(&buffer).trim().to_string());
        }
    };

    Box::pin(stream)
}

#[async_trait]
impl ChatBackend for OllamaClient {
    async fn open_stream(&self, request: &ChatRequest, timeout: Duration) -> Result<LineStream> {
        let response = self.post_chat(request, timeout).await?;
        debug!("Opened chat stream for model {}", request.model);
        Ok(ndjson_lines(response.bytes_stream()))
    }

    async fn complete(&self, request: &ChatRequest, timeout: Duration) -> Result<String> {
        let response = self.post_chat(request, timeout).await?;
        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| BotError::parsing(format!("Invalid chat response: {}", e)))?;
        Ok(body.content().unwrap_or_default().to_string())
    }
}

#[async_trait]
impl AvailabilityProbe for OllamaClient {
    async fn probe(&self) -> Result<()> {
        let response = self
            .client
            .get(self.endpoint("tags"))
            .timeout(self.probe_timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BotError::Upstream {
                status: status.as_u16(),
                message: "model list request failed".to_string(),
            });
        }

        let body = response.text().await?;
        let lists_models = serde_json::from_str::<serde_json::Value>(&body)
            .map(|value| value.get("models").is_some())
            .unwrap_or_else(|_| body.contains("models"));

        if lists_models {
            Ok(())
        } else {
            Err(BotError::parsing("model list response has no models field"))
        }
    }
}
