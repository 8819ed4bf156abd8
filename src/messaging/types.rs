//! Message types

use crate::config::models::NoticeTarget;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Where a reply goes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Conversation {
    Group(String),
    Private(String),
}

impl Conversation {
    pub fn group(id: impl Into<String>) -> Self {
        Self::Group(id.into())
    }

    pub fn private(id: impl Into<String>) -> Self {
        Self::Private(id.into())
    }

    pub fn group_id(&self) -> Option<&str> {
        match self {
            Self::Group(id) => Some(id),
            Self::Private(_) => None,
        }
    }
}

impl fmt::Display for Conversation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Group(id) => write!(f, "group:{}", id),
            Self::Private(id) => write!(f, "private:{}", id),
        }
    }
}

impl From<&NoticeTarget> for Conversation {
    fn from(target: &NoticeTarget) -> Self {
        match target {
            NoticeTarget::Group { group_id } => Self::Group(group_id.clone()),
            NoticeTarget::Private { user_id } => Self::Private(user_id.clone()),
        }
    }
}

/// One logical reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Plain text
    Text(String),
    /// Text addressed to a member
    Mention { user_id: String, text: String },
    /// Multi-part forwarded message
    Forward(Vec<String>),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn mention(user_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Mention {
            user_id: user_id.into(),
            text: text.into(),
        }
    }

    /// Forwarded message from `parts`; blank parts are dropped and the first
    /// kept part carries `prefix`
    pub fn forward<S: AsRef<str>>(prefix: &str, parts: &[S]) -> Self {
        let nodes = parts
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| !p.trim().is_empty())
            .enumerate()
            .map(|(i, p)| {
                if i == 0 {
                    format!("{}{}", prefix, p)
                } else {
                    p.to_string()
                }
            })
            .collect();
        Self::Forward(nodes)
    }

    /// Forwarded message with one node per paragraph of `text`
    pub fn paragraphs(prefix: &str, text: &str) -> Self {
        let mut parts = split_paragraphs(text);
        if parts.is_empty() {
            parts.push(text.to_string());
        }
        Self::forward(prefix, &parts)
    }

    /// Plain-text rendering
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Mention { user_id, text } => format!("@{} {}", user_id, text),
            Self::Forward(parts) => parts.join("\n---\n"),
        }
    }
}

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("Invalid paragraph regex"));

/// Split on blank lines, trimming and dropping empty paragraphs
pub fn split_paragraphs(text: &str) -> Vec<String> {
    PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
