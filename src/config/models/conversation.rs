//! Conversation memory and content filter configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-user conversation memory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Turns kept per user; older ones drop first
    #[serde(default = "default_max_turns")]
    pub max_turns: usize,
    /// Inactivity after which the history is discarded, in seconds
    #[serde(default = "default_context_ttl")]
    pub ttl: u64,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            max_turns: default_max_turns(),
            ttl: default_context_ttl(),
        }
    }
}

impl ConversationConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl)
    }
}

/// Content filter applied to generated text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Words replaced case-insensitively
    #[serde(default)]
    pub words: Vec<String>,
    #[serde(default = "default_replacement")]
    pub replacement: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            words: Vec::new(),
            replacement: default_replacement(),
        }
    }
}
