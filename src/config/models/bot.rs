//! Bot identity and notice configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Display name
    #[serde(default = "default_bot_name")]
    pub name: String,
    /// Prefix prepended to every generated reply
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Whether startup/shutdown notices are broadcast
    #[serde(default = "default_true")]
    pub notices_enabled: bool,
    /// Conversations that receive startup/shutdown notices
    #[serde(default)]
    pub notice_targets: Vec<NoticeTarget>,
    /// What a plain message addressed to the bot is answered with
    #[serde(default)]
    pub default_mode: ReplyMode,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            prefix: default_prefix(),
            notices_enabled: true,
            notice_targets: Vec::new(),
            default_mode: ReplyMode::default(),
        }
    }
}

/// Notice destination
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NoticeTarget {
    Group { group_id: String },
    Private { user_id: String },
}

/// Reply mode for plain messages
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReplyMode {
    /// Conversational reply with the chat profile
    #[default]
    Chat,
    /// Code assistant reply with the code profile
    Code,
}
