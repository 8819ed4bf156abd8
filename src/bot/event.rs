//! Inbound events

use crate::messaging::Conversation;

/// Event delivered by the platform adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Message {
        conversation: Conversation,
        user_id: String,
        user_name: String,
        /// Plain text with any leading mention of the bot removed
        text: String,
        /// Group message addressed to the bot
        to_me: bool,
        /// Text of the message being replied to
        quoted: Option<String>,
    },
    MemberJoined {
        group_id: String,
        group_name: String,
        user_id: String,
        user_name: String,
    },
}

impl InboundEvent {
    /// Private message helper
    pub fn private(user_id: impl Into<String>, text: impl Into<String>) -> Self {
        let user_id = user_id.into();
        Self::Message {
            conversation: Conversation::Private(user_id.clone()),
            user_name: user_id.clone(),
            user_id,
            text: text.into(),
            to_me: true,
            quoted: None,
        }
    }

    /// Group message helper
    pub fn group(
        group_id: impl Into<String>,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
        text: impl Into<String>,
        to_me: bool,
    ) -> Self {
        Self::Message {
            conversation: Conversation::Group(group_id.into()),
            user_id: user_id.into(),
            user_name: user_name.into(),
            text: text.into(),
            to_me,
            quoted: None,
        }
    }

    /// Attach quoted text to a message event
    pub fn with_quote(mut self, text: impl Into<String>) -> Self {
        if let Self::Message { quoted, .. } = &mut self {
            *quoted = Some(text.into());
        }
        self
    }
}
