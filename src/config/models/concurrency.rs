//! Concurrency, locking and retry configuration

use super::*;
use crate::utils::error::RetryConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Task runner and lock registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcurrencyConfig {
    /// Tasks allowed to run at once
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
    /// Lock registry capacity before bulk eviction
    #[serde(default = "default_max_locks")]
    pub max_locks: usize,
    /// Lock registry sweep interval in seconds
    #[serde(default = "default_lock_cleanup_interval")]
    pub lock_cleanup_interval: u64,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            max_locks: default_max_locks(),
            lock_cleanup_interval: default_lock_cleanup_interval(),
        }
    }
}

impl ConcurrencyConfig {
    pub fn lock_cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.lock_cleanup_interval)
    }
}

/// Backoff settings for one retry policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    /// Total attempts, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
    #[serde(default)]
    pub jitter: bool,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter: false,
        }
    }
}

impl From<&RetrySettings> for RetryConfig {
    fn from(settings: &RetrySettings) -> Self {
        RetryConfig {
            max_attempts: settings.max_attempts,
            base_delay: Duration::from_millis(settings.base_delay_ms),
            max_delay: Duration::from_millis(settings.max_delay_ms),
            backoff_multiplier: settings.backoff_multiplier,
            jitter: settings.jitter,
        }
    }
}

/// Retry policies used by the features
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicies {
    /// Model calls
    #[serde(default = "default_generation_retry")]
    pub generation: RetrySettings,
    /// Ledger transactions
    #[serde(default)]
    pub ledger: RetrySettings,
}

impl Default for RetryPolicies {
    fn default() -> Self {
        Self {
            generation: default_generation_retry(),
            ledger: RetrySettings::default(),
        }
    }
}

fn default_generation_retry() -> RetrySettings {
    RetrySettings {
        max_attempts: 2,
        base_delay_ms: 500,
        ..RetrySettings::default()
    }
}
