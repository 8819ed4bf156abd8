//! Retry mechanism with exponential backoff

use super::types::RetryConfig;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Retry mechanism with exponential backoff
///
/// The wrapped operation runs at most `max_attempts` times in total. After a
/// failed attempt the policy sleeps `base_delay * multiplier^attempt` (capped
/// at `max_delay`) unless that attempt was the last one, in which case the
/// final error is returned unchanged.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
    operation: String,
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new(config: RetryConfig) -> Self {
        Self {
            config,
            operation: "operation".to_string(),
        }
    }

    /// Name used in retry log lines
    pub fn with_name(mut self, operation: impl Into<String>) -> Self {
        self.operation = operation.into();
        self
    }

    /// Get the policy configuration
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute a function with retry logic, retrying every failure
    pub async fn call<F, Fut, R, E>(&self, f: F) -> std::result::Result<R, E>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<R, E>>,
        E: std::fmt::Display + std::fmt::Debug,
    {
        self.call_if(f, |_| true).await
    }

    /// Execute a function with retry logic, retrying only failures accepted by `is_retryable`
    pub async fn call_if<F, Fut, R, E, P>(
        &self,
        mut f: F,
        is_retryable: P,
    ) -> std::result::Result<R, E>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = std::result::Result<R, E>>,
        E: std::fmt::Display + std::fmt::Debug,
        P: Fn(&E) -> bool,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;

            match f().await {
                Ok(result) => {
                    if attempt > 1 {
                        debug!(
                            "{} succeeded on attempt {}/{}",
                            self.operation, attempt, max_attempts
                        );
                    }
                    return Ok(result);
                }
                Err(error) => {
                    if !is_retryable(&error) {
                        debug!(
                            "{} failed with a non-retryable error: {}",
                            self.operation, error
                        );
                        return Err(error);
                    }

                    if attempt >= max_attempts {
                        error!(
                            "{} failed after {} attempts: {}",
                            self.operation, attempt, error
                        );
                        return Err(error);
                    }

                    let delay = self.jittered(self.config.delay_for(attempt - 1));
                    warn!(
                        "{} attempt {}/{} failed: {}, retrying in {:?}",
                        self.operation, attempt, max_attempts, error, delay
                    );

                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    fn jittered(&self, delay: Duration) -> Duration {
        if !self.config.jitter {
            return delay;
        }
        let jitter_factor = 0.1;
        let jitter =
            delay.as_millis() as f64 * jitter_factor * (rand::random::<f64>() - 0.5);
        Duration::from_millis((delay.as_millis() as f64 + jitter).max(0.0) as u64)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}
