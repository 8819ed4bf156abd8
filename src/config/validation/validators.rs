//! Section validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;

impl Validate for BotConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Bot name cannot be empty".to_string());
        }

        for target in &self.notice_targets {
            let id = match target {
                NoticeTarget::Group { group_id } => group_id,
                NoticeTarget::Private { user_id } => user_id,
            };
            if id.trim().is_empty() {
                return Err("Notice target id cannot be empty".to_string());
            }
        }

        Ok(())
    }
}

impl Validate for OllamaConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating model server configuration");

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("Model server URL must start with http:// or https://".to_string());
        }

        if self.request_timeout == 0 || self.line_timeout == 0 || self.fallback_timeout == 0 {
            return Err("Model server timeouts must be greater than 0".to_string());
        }

        if self.line_timeout > self.request_timeout {
            return Err("Line timeout cannot exceed the request timeout".to_string());
        }

        for (feature, profile) in [
            ("chat", &self.profiles.chat),
            ("write", &self.profiles.write),
            ("code", &self.profiles.code),
            ("ctf", &self.profiles.ctf),
            ("welcome", &self.profiles.welcome),
        ] {
            if profile.model.trim().is_empty() {
                return Err(format!("Model name for '{}' cannot be empty", feature));
            }
        }

        Ok(())
    }
}

impl Validate for RateLimitConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_calls == 0 {
            return Err("Rate limit max_calls must be greater than 0".to_string());
        }

        if self.time_window == 0 {
            return Err("Rate limit time_window must be greater than 0".to_string());
        }

        if self.poll_interval_ms == 0 {
            return Err("Rate limit poll interval must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for RateLimitsConfig {
    fn validate(&self) -> Result<(), String> {
        for (name, limiter) in [
            ("ai", &self.ai),
            ("ledger", &self.ledger),
            ("welcome", &self.welcome),
        ] {
            limiter
                .validate()
                .map_err(|e| format!("{} limiter: {}", name, e))?;
        }
        Ok(())
    }
}

impl Validate for ConcurrencyConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_concurrent == 0 {
            return Err("max_concurrent must be greater than 0".to_string());
        }

        if self.max_locks < 4 {
            return Err("max_locks must be at least 4".to_string());
        }

        if self.lock_cleanup_interval == 0 {
            return Err("Lock cleanup interval must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for RetrySettings {
    fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 {
            return Err("Retry max_attempts must be greater than 0".to_string());
        }

        if self.backoff_multiplier < 1.0 {
            return Err("Retry backoff multiplier must be at least 1.0".to_string());
        }

        if self.base_delay_ms > self.max_delay_ms {
            return Err("Retry base delay cannot exceed the max delay".to_string());
        }

        Ok(())
    }
}

impl Validate for RetryPolicies {
    fn validate(&self) -> Result<(), String> {
        self.generation
            .validate()
            .map_err(|e| format!("generation: {}", e))?;
        self.ledger.validate().map_err(|e| format!("ledger: {}", e))
    }
}

impl Validate for ConversationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_turns == 0 {
            return Err("Conversation max_turns must be greater than 0".to_string());
        }

        if self.ttl == 0 {
            return Err("Conversation TTL must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for FilterConfig {
    fn validate(&self) -> Result<(), String> {
        if self.words.iter().any(|w| w.trim().is_empty()) {
            return Err("Filter words cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("Database URL cannot be empty".to_string());
        }

        if !self.url.starts_with("sqlite:")
            && !self.url.starts_with("postgresql://")
            && !self.url.starts_with("postgres://")
        {
            return Err("Database URL must be a sqlite: or postgres:// URL".to_string());
        }

        if self.max_connections == 0 {
            return Err("Database max connections must be greater than 0".to_string());
        }

        if self.connection_timeout == 0 {
            return Err("Database connection timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for MonitoringConfig {
    fn validate(&self) -> Result<(), String> {
        if self.health.interval == 0 {
            return Err("Health check interval must be greater than 0".to_string());
        }

        if self.health.timeout == 0 || self.health.timeout >= self.health.interval {
            return Err("Health probe timeout must be positive and shorter than the interval".to_string());
        }

        if self.performance.enabled && self.performance.summary_interval == 0 {
            return Err("Performance summary interval must be greater than 0".to_string());
        }

        if self.performance.max_records == 0 {
            return Err("Performance max_records must be greater than 0".to_string());
        }

        Ok(())
    }
}
