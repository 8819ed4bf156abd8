//! Conversation store implementation

use crate::config::models::ConversationConfig;
use crate::core::ollama::{ChatMessage, ChatRole};
use dashmap::DashMap;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Default)]
struct ConversationContext {
    turns: VecDeque<ChatMessage>,
    last_activity: Option<Instant>,
}

impl ConversationContext {
    fn expire_if_stale(&mut self, now: Instant, ttl: Duration) {
        if let Some(last) = self.last_activity {
            if now.duration_since(last) > ttl {
                self.turns.clear();
                self.last_activity = None;
            }
        }
    }
}

/// Memory summary for one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextStatus {
    pub memory_enabled: bool,
    /// Turns currently stored
    pub turns: usize,
    /// Time until the history expires; None when nothing is stored
    pub expires_in: Option<Duration>,
}

/// Bounded, expiring per-user chat histories
pub struct ConversationStore {
    max_turns: usize,
    ttl: Duration,
    contexts: DashMap<String, ConversationContext>,
    memory: DashMap<String, bool>,
}

impl ConversationStore {
    /// Create a new store
    pub fn new(config: &ConversationConfig) -> Self {
        Self {
            max_turns: config.max_turns.max(1),
            ttl: config.ttl(),
            contexts: DashMap::new(),
            memory: DashMap::new(),
        }
    }

    /// Whether the user opted in to memory (off by default)
    pub fn memory_enabled(&self, user_id: &str) -> bool {
        self.memory.get(user_id).map(|v| *v).unwrap_or(false)
    }

    /// Turn memory on or off; turning it off also clears the history
    pub fn set_memory(&self, user_id: &str, enabled: bool) {
        self.memory.insert(user_id.to_string(), enabled);
        if !enabled {
            self.clear(user_id);
        }
    }

    /// Append a turn, dropping the oldest beyond capacity
    pub fn add(&self, user_id: &str, role: ChatRole, content: impl Into<String>) {
        let now = Instant::now();
        let mut context = self.contexts.entry(user_id.to_string()).or_default();
        context.expire_if_stale(now, self.ttl);

        context.turns.push_back(ChatMessage {
            role,
            content: content.into(),
        });
        while context.turns.len() > self.max_turns {
            context.turns.pop_front();
        }
        context.last_activity = Some(now);
    }

    /// Stored turns, oldest first; an expired history comes back empty
    pub fn history(&self, user_id: &str) -> Vec<ChatMessage> {
        let now = Instant::now();
        match self.contexts.get_mut(user_id) {
            Some(mut context) => {
                context.expire_if_stale(now, self.ttl);
                context.turns.iter().cloned().collect()
            }
            None => Vec::new(),
        }
    }

    /// Forget the user's history
    pub fn clear(&self, user_id: &str) {
        if let Some(mut context) = self.contexts.get_mut(user_id) {
            context.turns.clear();
            context.last_activity = None;
        }
    }

    /// Memory mode, stored turn count and remaining lifetime
    pub fn status(&self, user_id: &str) -> ContextStatus {
        let now = Instant::now();
        let memory_enabled = self.memory_enabled(user_id);

        let (turns, expires_in) = match self.contexts.get_mut(user_id) {
            Some(mut context) => {
                context.expire_if_stale(now, self.ttl);
                let turns = context.turns.len();
                let expires_in = match (turns, context.last_activity) {
                    (0, _) | (_, None) => None,
                    (_, Some(last)) => Some(self.ttl.saturating_sub(now.duration_since(last))),
                };
                (turns, expires_in)
            }
            None => (0, None),
        };

        ContextStatus {
            memory_enabled,
            turns,
            expires_in,
        }
    }
}
