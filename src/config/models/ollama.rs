//! Model server configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ollama server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL of the server, without the `/api` suffix
    #[serde(default = "default_ollama_url")]
    pub base_url: String,
    /// Overall timeout for a streaming request, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
    /// Timeout for reading a single stream line, in seconds
    #[serde(default = "default_line_timeout")]
    pub line_timeout: u64,
    /// Timeout for the non-streaming fallback, in seconds
    #[serde(default = "default_fallback_timeout")]
    pub fallback_timeout: u64,
    /// Timeout for welcome generation, in seconds
    #[serde(default = "default_welcome_timeout")]
    pub welcome_timeout: u64,
    /// Model and system prompt per feature
    #[serde(default)]
    pub profiles: ModelProfiles,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_url(),
            request_timeout: default_request_timeout(),
            line_timeout: default_line_timeout(),
            fallback_timeout: default_fallback_timeout(),
            welcome_timeout: default_welcome_timeout(),
            profiles: ModelProfiles::default(),
        }
    }
}

impl OllamaConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    pub fn line_timeout(&self) -> Duration {
        Duration::from_secs(self.line_timeout)
    }

    pub fn fallback_timeout(&self) -> Duration {
        Duration::from_secs(self.fallback_timeout)
    }

    pub fn welcome_timeout(&self) -> Duration {
        Duration::from_secs(self.welcome_timeout)
    }
}

/// A model name paired with its system prompt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelProfile {
    pub model: String,
    #[serde(default)]
    pub system_prompt: String,
}

impl ModelProfile {
    pub fn new(model: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system_prompt: system_prompt.into(),
        }
    }
}

/// Profiles for each generating feature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelProfiles {
    #[serde(default = "default_chat_profile")]
    pub chat: ModelProfile,
    #[serde(default = "default_write_profile")]
    pub write: ModelProfile,
    #[serde(default = "default_code_profile")]
    pub code: ModelProfile,
    #[serde(default = "default_ctf_profile")]
    pub ctf: ModelProfile,
    #[serde(default = "default_welcome_profile")]
    pub welcome: ModelProfile,
}

impl Default for ModelProfiles {
    fn default() -> Self {
        Self {
            chat: default_chat_profile(),
            write: default_write_profile(),
            code: default_code_profile(),
            ctf: default_ctf_profile(),
            welcome: default_welcome_profile(),
        }
    }
}

fn default_chat_profile() -> ModelProfile {
    ModelProfile::new(
        "bean_chat",
        "You are a friendly group chat companion. Keep answers short and warm.",
    )
}

fn default_write_profile() -> ModelProfile {
    ModelProfile::new(
        "bean_write",
        "You are a creative writer. Write in well separated paragraphs.",
    )
}

fn default_code_profile() -> ModelProfile {
    ModelProfile::new(
        "code",
        "You are a programming assistant. Explain briefly, then show the code.",
    )
}

fn default_ctf_profile() -> ModelProfile {
    ModelProfile::new(
        "ctf",
        "You are a security researcher helping with CTF practice challenges.",
    )
}

fn default_welcome_profile() -> ModelProfile {
    ModelProfile::new(
        "bean_chat",
        "Write a one or two sentence welcome for a new group member.",
    )
}
