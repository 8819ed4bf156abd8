//! Utility modules for the bot
//!
//! - **error**: error type, categories and retry policy
//! - **logging**: tracing subscriber setup

pub mod error; // Error handling
pub mod logging;

pub use error::{BotError, ErrorCategory, Result, RetryConfig, RetryPolicy};
pub use logging::init_logging;

/// Truncate to at most `max_chars` characters, appending an ellipsis when cut
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
