//! Core rate limiter implementation

use super::types::{RateLimitEntry, RateLimitResult};
use crate::config::models::rate_limit::RateLimitConfig;
use crate::core::registry::{ExpiringRegistry, RegistryConfig};
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Keyed sliding window rate limiter
///
/// A key is admitted when fewer than `max_calls` of its recorded calls are
/// younger than the window. Only admitted calls are recorded, so a denial
/// never pushes the next admission further out. The key's entry is looked
/// up under the registry lock, which is released before the check and the
/// record happen under the entry's own lock.
pub struct RateLimiter {
    name: &'static str,
    config: RateLimitConfig,
    window: Duration,
    entries: ExpiringRegistry<RateLimitEntry>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(name: &'static str, config: RateLimitConfig) -> Self {
        let window = config.window();
        Self::build(name, config, window)
    }

    /// Create a rate limiter with explicit limits
    pub fn with_limits(name: &'static str, max_calls: u32, window: Duration) -> Self {
        let config = RateLimitConfig {
            max_calls,
            time_window: window.as_secs(),
            ..RateLimitConfig::default()
        };
        Self::build(name, config, window)
    }

    fn build(name: &'static str, config: RateLimitConfig, window: Duration) -> Self {
        Self {
            name,
            // A key idle for a whole window has no live timestamps left
            entries: ExpiringRegistry::new(name, RegistryConfig::unbounded(window, window)),
            window,
            config,
        }
    }

    /// Limiter name used in logs
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Calls admitted per window
    pub fn max_calls(&self) -> u32 {
        self.config.max_calls
    }

    /// Window length
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Admit and record a call for `key`, or deny it without side effects
    pub fn acquire(&self, key: &str) -> bool {
        self.check_and_record(key).allowed
    }

    /// Atomically check and record a call, returning the detailed result
    pub fn check_and_record(&self, key: &str) -> RateLimitResult {
        let entry = self.entries.get_or_create(key, RateLimitEntry::default);
        let now = Instant::now();
        let mut timestamps = entry.timestamps.lock();
        self.prune(&mut timestamps, now);

        let count = timestamps.len() as u32;
        if count < self.config.max_calls {
            timestamps.push_back(now);
            let current_count = count + 1;
            RateLimitResult {
                allowed: true,
                current_count,
                limit: self.config.max_calls,
                remaining: self.config.max_calls - current_count,
                retry_after: None,
            }
        } else {
            let retry_after = timestamps
                .front()
                .map(|oldest| self.window.saturating_sub(now.duration_since(*oldest)));
            debug!(
                limiter = self.name,
                key = key,
                count = count,
                "Rate limit exceeded"
            );
            RateLimitResult {
                allowed: false,
                current_count: count,
                limit: self.config.max_calls,
                remaining: 0,
                retry_after,
            }
        }
    }

    /// Inspect a key without recording a call
    #[cfg(test)]
    pub(crate) fn check(&self, key: &str) -> RateLimitResult {
        let Some(entry) = self.entries.get(key) else {
            return RateLimitResult {
                allowed: self.config.max_calls > 0,
                current_count: 0,
                limit: self.config.max_calls,
                remaining: self.config.max_calls,
                retry_after: None,
            };
        };

        let now = Instant::now();
        let mut timestamps = entry.timestamps.lock();
        self.prune(&mut timestamps, now);
        let count = timestamps.len() as u32;
        let allowed = count < self.config.max_calls;

        RateLimitResult {
            allowed,
            current_count: count,
            limit: self.config.max_calls,
            remaining: self.config.max_calls.saturating_sub(count),
            retry_after: if allowed {
                None
            } else {
                timestamps
                    .front()
                    .map(|oldest| self.window.saturating_sub(now.duration_since(*oldest)))
            },
        }
    }

    /// Poll `acquire` until it succeeds or `timeout` elapses
    pub async fn wait_for_permission(&self, key: &str, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        let poll_interval = self.config.poll_interval();

        loop {
            if self.acquire(key) {
                return true;
            }

            let now = Instant::now();
            if now >= deadline {
                debug!(
                    limiter = self.name,
                    key = key,
                    "Gave up waiting for rate limit permission after {:?}",
                    timeout
                );
                return false;
            }

            tokio::time::sleep(poll_interval.min(deadline - now)).await;
        }
    }

    /// Drop state for keys idle longer than one window
    #[cfg(test)]
    pub(crate) fn cleanup(&self) -> usize {
        self.entries.sweep()
    }

    /// Number of tracked keys
    #[cfg(test)]
    pub(crate) fn tracked_keys(&self) -> usize {
        self.entries.len()
    }

    // Keep only timestamps strictly younger than the window
    fn prune(&self, timestamps: &mut VecDeque<Instant>, now: Instant) {
        while let Some(oldest) = timestamps.front() {
            if now.duration_since(*oldest) < self.window {
                break;
            }
            timestamps.pop_front();
        }
    }
}
