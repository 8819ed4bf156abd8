//! Content filter for generated text

use crate::config::models::FilterConfig;
use crate::utils::error::{BotError, Result};
use regex::{Regex, RegexBuilder};

/// Case-insensitive word masking applied to every generated reply
#[derive(Debug, Clone)]
pub struct ContentFilter {
    patterns: Vec<Regex>,
    replacement: String,
}

impl ContentFilter {
    /// Build a filter masking each of `words`
    pub fn new<S: AsRef<str>>(words: &[S], replacement: impl Into<String>) -> Result<Self> {
        let patterns = words
            .iter()
            .map(|word| {
                RegexBuilder::new(&regex::escape(word.as_ref()))
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| BotError::Config(format!("Invalid filter word: {}", e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            patterns,
            replacement: replacement.into(),
        })
    }

    pub fn from_config(config: &FilterConfig) -> Result<Self> {
        Self::new(&config.words, config.replacement.clone())
    }

    /// Filter that leaves text unchanged
    pub fn disabled() -> Self {
        Self {
            patterns: Vec::new(),
            replacement: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Replace every character of each match with the replacement
    pub fn apply(&self, text: &str) -> String {
        let mut output = text.to_string();
        for pattern in &self.patterns {
            output = pattern
                .replace_all(&output, |caps: &regex::Captures| {
                    self.replacement.repeat(caps[0].chars().count())
                })
                .into_owned();
        }
        output
    }
}
