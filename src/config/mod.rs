//! Configuration management for the bot
//!
//! This module handles loading, validation, and environment overrides of all
//! bot configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{BotError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the bot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default)]
    pub rate_limits: RateLimitsConfig,
    #[serde(default)]
    pub concurrency: ConcurrencyConfig,
    #[serde(default)]
    pub retry: RetryPolicies,
    #[serde(default)]
    pub conversation: ConversationConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| BotError::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| BotError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `LLMBOT_*` environment overrides
    pub fn apply_env(mut self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok());
        self
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("LLMBOT_OLLAMA_URL") {
            debug!("Model server URL overridden from environment");
            self.ollama.base_url = url;
        }
        if let Some(url) = lookup("LLMBOT_DATABASE_URL") {
            debug!("Database URL overridden from environment");
            self.storage.database.url = url;
        }
        if let Some(level) = lookup("LLMBOT_LOG_LEVEL") {
            self.monitoring.logging.level = level;
        }
        if let Some(prefix) = lookup("LLMBOT_BOT_PREFIX") {
            self.bot.prefix = prefix;
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.bot
            .validate()
            .map_err(|e| BotError::Config(format!("Bot config error: {}", e)))?;
        self.ollama
            .validate()
            .map_err(|e| BotError::Config(format!("Model server config error: {}", e)))?;
        self.rate_limits
            .validate()
            .map_err(|e| BotError::Config(format!("Rate limit config error: {}", e)))?;
        self.concurrency
            .validate()
            .map_err(|e| BotError::Config(format!("Concurrency config error: {}", e)))?;
        self.retry
            .validate()
            .map_err(|e| BotError::Config(format!("Retry config error: {}", e)))?;
        self.conversation
            .validate()
            .map_err(|e| BotError::Config(format!("Conversation config error: {}", e)))?;
        self.filter
            .validate()
            .map_err(|e| BotError::Config(format!("Filter config error: {}", e)))?;
        self.storage
            .database
            .validate()
            .map_err(|e| BotError::Config(format!("Database config error: {}", e)))?;
        self.monitoring
            .validate()
            .map_err(|e| BotError::Config(format!("Monitoring config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| BotError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
