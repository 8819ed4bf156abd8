//! Error types for the bot

use thiserror::Error;

/// Result type alias for the bot
pub type Result<T> = std::result::Result<T, BotError>;

/// Main error type for the bot
#[derive(Error, Debug)]
pub enum BotError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Connection refused, reset or unreachable upstream
    #[error("Connection error: {0}")]
    Connection(String),

    /// Upstream answered with a non-success status
    #[error("Upstream returned HTTP {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Malformed payloads
    #[error("Parsing error: {0}")]
    Parsing(String),

    /// Rate limiting errors
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Model server or runner not accepting work
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Human-readable failure category, used for user-facing replies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Timeout,
    Connection,
    Parse,
    RateLimited,
    Unavailable,
    Internal,
}

impl ErrorCategory {
    /// Short apologetic text shown to end users. Never contains raw error detail.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Timeout => "Sorry, the model took too long to answer. Please try again later.",
            Self::Connection => {
                "Sorry, I can't reach the model server right now. Please try again later."
            }
            Self::Parse => "Sorry, the model returned something I couldn't read.",
            Self::RateLimited => "You're going a bit fast, please wait a moment.",
            Self::Unavailable => "The model is on standby at the moment, please try again later.",
            Self::Internal => "Sorry, something went wrong while handling that.",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Timeout => "timeout",
            Self::Connection => "connection",
            Self::Parse => "parse",
            Self::RateLimited => "rate_limited",
            Self::Unavailable => "unavailable",
            Self::Internal => "internal",
        };
        f.write_str(name)
    }
}
