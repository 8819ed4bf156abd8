//! Helper functions for creating and classifying errors

use super::types::{BotError, ErrorCategory};

/// Helper functions for creating specific errors
impl BotError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn connection<S: Into<String>>(message: S) -> Self {
        Self::Connection(message.into())
    }

    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing(message.into())
    }

    pub fn rate_limit<S: Into<String>>(message: S) -> Self {
        Self::RateLimit(message.into())
    }

    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Classify the error for logging and user-facing replies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Timeout(_) => ErrorCategory::Timeout,
            Self::Connection(_) => ErrorCategory::Connection,
            Self::HttpClient(e) if e.is_timeout() => ErrorCategory::Timeout,
            Self::HttpClient(e) if e.is_connect() || e.is_request() => ErrorCategory::Connection,
            Self::HttpClient(e) if e.is_decode() || e.is_body() => ErrorCategory::Parse,
            Self::HttpClient(_) => ErrorCategory::Connection,
            Self::Parsing(_) | Self::Serialization(_) => ErrorCategory::Parse,
            Self::Upstream { status, .. } if *status >= 500 => ErrorCategory::Unavailable,
            Self::RateLimit(_) => ErrorCategory::RateLimited,
            Self::Unavailable(_) => ErrorCategory::Unavailable,
            _ => ErrorCategory::Internal,
        }
    }

    /// Whether retrying the same operation could plausibly succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Upstream { status, .. } => *status >= 500 || *status == 429,
            Self::Database(_) => true,
            _ => matches!(
                self.category(),
                ErrorCategory::Timeout | ErrorCategory::Connection | ErrorCategory::Parse
            ),
        }
    }
}
