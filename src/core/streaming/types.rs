//! Streaming reader types

use crate::config::models::OllamaConfig;
use std::time::Duration;

/// Reader timeouts
#[derive(Debug, Clone)]
pub struct StreamingConfig {
    /// Budget for the whole streaming request
    pub request_timeout: Duration,
    /// Longest wait for the next line
    pub line_timeout: Duration,
    /// Budget for the non-streaming fallback
    pub fallback_timeout: Duration,
}

impl Default for StreamingConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(60),
            line_timeout: Duration::from_secs(30),
            fallback_timeout: Duration::from_secs(90),
        }
    }
}

impl From<&OllamaConfig> for StreamingConfig {
    fn from(config: &OllamaConfig) -> Self {
        Self {
            request_timeout: config.request_timeout(),
            line_timeout: config.line_timeout(),
            fallback_timeout: config.fallback_timeout(),
        }
    }
}

/// Where the final text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    /// Stream finished or ended normally
    Stream,
    /// Stream stalled or broke after producing text; text is what arrived
    Partial,
    /// Stream stalled before any text; text comes from the non-streaming request
    Fallback,
    /// Direct non-streaming request
    Complete,
}

/// Final reply text and its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub text: String,
    pub source: ResponseSource,
}

impl GenerationOutcome {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}
