//! Rate limiting configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sliding window limiter configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Calls admitted per key within one window
    #[serde(default = "default_max_calls")]
    pub max_calls: u32,
    /// Window length in seconds
    #[serde(default = "default_time_window")]
    pub time_window: u64,
    /// Poll interval for `wait_for_permission`, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_calls: default_max_calls(),
            time_window: default_time_window(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_calls: u32, time_window: u64) -> Self {
        Self {
            max_calls,
            time_window,
            ..Self::default()
        }
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.time_window)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Named limiters used by the features
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RateLimitsConfig {
    /// Generation commands (chat, write, code, ctf)
    #[serde(default = "default_ai_limit")]
    pub ai: RateLimitConfig,
    /// Ledger commands (sign-in, points, leaderboard, backfill, history)
    #[serde(default = "default_ledger_limit")]
    pub ledger: RateLimitConfig,
    /// Welcome messages, keyed per group
    #[serde(default = "default_welcome_limit")]
    pub welcome: RateLimitConfig,
}

impl Default for RateLimitsConfig {
    fn default() -> Self {
        Self {
            ai: default_ai_limit(),
            ledger: default_ledger_limit(),
            welcome: default_welcome_limit(),
        }
    }
}

fn default_ai_limit() -> RateLimitConfig {
    RateLimitConfig::new(20, 60)
}

fn default_ledger_limit() -> RateLimitConfig {
    RateLimitConfig::new(30, 60)
}

fn default_welcome_limit() -> RateLimitConfig {
    RateLimitConfig::new(10, 60)
}
