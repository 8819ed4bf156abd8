//! Configuration data models
//!
//! This module defines all configuration structures used throughout the bot.

#![allow(missing_docs)]

pub mod bot;
pub mod concurrency;
pub mod conversation;
pub mod monitoring;
pub mod ollama;
pub mod rate_limit;
pub mod storage;

// Re-export all configuration types
pub use bot::*;
pub use concurrency::*;
pub use conversation::*;
pub use monitoring::*;
pub use ollama::*;
pub use rate_limit::*;
pub use storage::*;

/// Default reply prefix
pub fn default_prefix() -> String {
    "Bean: ".to_string()
}

pub fn default_bot_name() -> String {
    "Bean".to_string()
}

pub fn default_true() -> bool {
    true
}

pub fn default_ollama_url() -> String {
    "http://127.0.0.1:11434".to_string()
}

/// Default streaming request timeout in seconds
pub fn default_request_timeout() -> u64 {
    60
}

/// Default per-line read timeout in seconds
pub fn default_line_timeout() -> u64 {
    30
}

/// Default non-streaming fallback timeout in seconds
pub fn default_fallback_timeout() -> u64 {
    90
}

pub fn default_welcome_timeout() -> u64 {
    10
}

pub fn default_max_calls() -> u32 {
    20
}

pub fn default_time_window() -> u64 {
    60
}

pub fn default_poll_interval_ms() -> u64 {
    1000
}

pub fn default_max_concurrent() -> usize {
    20
}

pub fn default_max_locks() -> usize {
    2000
}

/// Default lock registry sweep interval in seconds
pub fn default_lock_cleanup_interval() -> u64 {
    300
}

pub fn default_max_attempts() -> u32 {
    3
}

pub fn default_base_delay_ms() -> u64 {
    100
}

pub fn default_max_delay_ms() -> u64 {
    10_000
}

pub fn default_backoff_multiplier() -> f64 {
    2.0
}

pub fn default_max_turns() -> usize {
    5
}

/// Default conversation memory TTL in seconds
pub fn default_context_ttl() -> u64 {
    600
}

pub fn default_replacement() -> String {
    "*".to_string()
}

pub fn default_database_url() -> String {
    "sqlite://data/llmbot.db?mode=rwc".to_string()
}

pub fn default_max_connections() -> u32 {
    5
}

/// Default connection timeout in seconds
pub fn default_connection_timeout() -> u64 {
    5
}

pub fn default_health_interval() -> u64 {
    30
}

pub fn default_probe_timeout() -> u64 {
    2
}

pub fn default_summary_interval() -> u64 {
    300
}

pub fn default_max_records() -> usize {
    1000
}

/// Default age after which performance records are dropped, in seconds
pub fn default_record_ttl() -> u64 {
    3600
}

pub fn default_log_level() -> String {
    "info".to_string()
}
