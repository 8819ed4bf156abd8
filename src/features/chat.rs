//! Chat assistant: conversation, writing, code and CTF helpers

use super::Services;
use crate::config::models::{ModelProfile, ModelProfiles};
use crate::core::ConversationStore;
use crate::core::conversation::ContextStatus;
use crate::core::ollama::{ChatMessage, ChatRequest, ChatRole};
use crate::messaging::{Conversation, Reply};
use crate::utils::error::{BotError, Result, RetryConfig, RetryPolicy};
use std::sync::Arc;
use tracing::{debug, warn};

/// Shown when the model returned only whitespace
pub const EMPTY_REPLY: &str = "(The model produced nothing, please check the model setup.)";

/// Kinds of generation requests a user can make
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    Chat,
    Write,
    Code,
    Ctf,
}

impl GenerationKind {
    /// Name used in rate-limit keys and performance records
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Write => "write",
            Self::Code => "code",
            Self::Ctf => "ctf",
        }
    }

    pub fn profile<'a>(&self, profiles: &'a ModelProfiles) -> &'a ModelProfile {
        match self {
            Self::Chat => &profiles.chat,
            Self::Write => &profiles.write,
            Self::Code => &profiles.code,
            Self::Ctf => &profiles.ctf,
        }
    }

    /// Rate-limit key for `user_id`
    pub fn rate_key(&self, user_id: &str) -> String {
        format!("{}:{}", self.as_str(), user_id)
    }

    fn usage_hint(&self) -> &'static str {
        match self {
            Self::Chat => "(What would you like to talk about?)",
            Self::Write => "(Tell me what to write, e.g. /write a short story about autumn rain)",
            Self::Code => "(Describe the code you need, e.g. /code parse a CSV file in Rust)",
            Self::Ctf => "(Paste the challenge, e.g. /ctf this binary asks for a password...)",
        }
    }
}

/// Build the prompt actually sent to the model
pub fn build_prompt(kind: GenerationKind, prompt: &str, quoted: Option<&str>) -> String {
    let body = match kind {
        GenerationKind::Ctf => format!(
            "CTF challenge analysis: {}\nPlease outline an approach:",
            prompt
        ),
        _ => prompt.to_string(),
    };
    match quoted.map(str::trim).filter(|q| !q.is_empty()) {
        Some(quoted) => format!("{}\n{}", quoted, body),
        None => body,
    }
}

/// Memory status line
pub fn format_status(status: &ContextStatus, available: bool) -> String {
    let mut text = if status.memory_enabled {
        format!(
            "(memory mode: on, {} turns stored, expires in {} seconds)",
            status.turns,
            status.expires_in.map(|d| d.as_secs()).unwrap_or(0)
        )
    } else {
        "(memory mode: off, no context memory)".to_string()
    };
    if !available {
        text.push_str("(system on standby, waiting for the model server)");
    }
    text
}

/// Chat and text generation features
pub struct ChatService {
    services: Arc<Services>,
    retry: RetryPolicy,
}

impl ChatService {
    pub fn new(services: Arc<Services>) -> Self {
        let retry = RetryPolicy::new(RetryConfig::from(&services.config.retry.generation))
            .with_name("generation");
        Self { services, retry }
    }

    fn conversations(&self) -> &ConversationStore {
        &self.services.conversations
    }

    /// Answer a plain message with one text reply
    pub async fn chat(&self, target: &Conversation, user_id: &str, text: &str) -> Result<()> {
        let prefix = self.services.prefix().to_string();
        let text = text.trim();
        if text.is_empty() {
            return self
                .services
                .send(target, Reply::text(GenerationKind::Chat.usage_hint()))
                .await;
        }

        if let Some(reply) = self.admit(GenerationKind::Chat, user_id) {
            return self.services.send(target, reply).await;
        }

        let content = self.respond(GenerationKind::Chat, user_id, text).await;
        self.services
            .send(target, Reply::text(format!("{}{}", prefix, content)))
            .await
    }

    /// Writing, code and CTF requests, answered as one multi-part reply
    pub async fn generate_document(
        &self,
        kind: GenerationKind,
        target: &Conversation,
        user_id: &str,
        prompt: &str,
        quoted: Option<&str>,
    ) -> Result<()> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return self.services.send(target, Reply::text(kind.usage_hint())).await;
        }

        if let Some(reply) = self.admit(kind, user_id) {
            return self.services.send(target, reply).await;
        }

        let content = self
            .respond(kind, user_id, &build_prompt(kind, prompt, quoted))
            .await;
        self.services
            .send(target, Reply::paragraphs(self.services.prefix(), &content))
            .await
    }

    pub async fn write(
        &self,
        target: &Conversation,
        user_id: &str,
        prompt: &str,
        quoted: Option<&str>,
    ) -> Result<()> {
        self.generate_document(GenerationKind::Write, target, user_id, prompt, quoted)
            .await
    }

    pub async fn code(
        &self,
        target: &Conversation,
        user_id: &str,
        prompt: &str,
        quoted: Option<&str>,
    ) -> Result<()> {
        self.generate_document(GenerationKind::Code, target, user_id, prompt, quoted)
            .await
    }

    pub async fn ctf(
        &self,
        target: &Conversation,
        user_id: &str,
        prompt: &str,
        quoted: Option<&str>,
    ) -> Result<()> {
        self.generate_document(GenerationKind::Ctf, target, user_id, prompt, quoted)
            .await
    }

    /// None when the request may proceed, otherwise the refusal to send
    fn admit(&self, kind: GenerationKind, user_id: &str) -> Option<Reply> {
        let prefix = self.services.prefix();
        if !self.services.is_available() {
            debug!(user_id, kind = kind.as_str(), "Refusing request while on standby");
            return Some(Reply::text(format!(
                "{}System on standby, waiting for the model server to come back...",
                prefix
            )));
        }

        if !self.services.ai_limiter.acquire(&kind.rate_key(user_id)) {
            return Some(Reply::text(format!(
                "{}You are using {} too often, please try again later.",
                prefix,
                kind.as_str()
            )));
        }
        None
    }

    /// Generate on the task runner; failures become user-facing text
    async fn respond(&self, kind: GenerationKind, user_id: &str, prompt: &str) -> String {
        let result = self
            .services
            .runner
            .execute(
                self.services
                    .performance
                    .track(kind.as_str(), self.generate(kind, user_id, prompt)),
            )
            .await;

        match result {
            Ok(text) => text,
            Err(e) => {
                warn!(user_id, kind = kind.as_str(), "Generation failed: {}", e);
                e.category().user_message().to_string()
            }
        }
    }

    /// Generate a reply, replaying and updating memory when it is enabled
    pub async fn generate(
        &self,
        kind: GenerationKind,
        user_id: &str,
        prompt: &str,
    ) -> Result<String> {
        let profile = kind.profile(&self.services.config.ollama.profiles);
        let memory = self.conversations().memory_enabled(user_id);

        let mut messages = vec![ChatMessage::system(profile.system_prompt.clone())];
        if memory {
            self.conversations().add(user_id, ChatRole::User, prompt);
            messages.extend(self.conversations().history(user_id));
        } else {
            messages.push(ChatMessage::user(prompt));
        }
        let request = ChatRequest::new(profile.model.clone(), messages);

        let outcome = self
            .retry
            .call_if(
                || self.services.reader.generate(&request),
                BotError::is_transient,
            )
            .await?;

        if outcome.is_empty() {
            return Ok(EMPTY_REPLY.to_string());
        }
        if memory {
            self.conversations()
                .add(user_id, ChatRole::Assistant, outcome.text.clone());
        }
        Ok(outcome.text)
    }

    pub async fn memory_on(&self, target: &Conversation, user_id: &str) -> Result<()> {
        self.conversations().set_memory(user_id, true);
        self.services
            .send(
                target,
                Reply::text("(Memory is on, I will remember our recent conversation.)"),
            )
            .await
    }

    pub async fn memory_off(&self, target: &Conversation, user_id: &str) -> Result<()> {
        self.conversations().set_memory(user_id, false);
        self.services
            .send(
                target,
                Reply::text("(Memory is off and our earlier conversation was cleared.)"),
            )
            .await
    }

    pub async fn forget(&self, target: &Conversation, user_id: &str) -> Result<()> {
        self.conversations().clear(user_id);
        self.services
            .send(target, Reply::text("(Memory cleared, we can start fresh.)"))
            .await
    }

    pub async fn status(&self, target: &Conversation, user_id: &str) -> Result<()> {
        let status = self.conversations().status(user_id);
        let text = format_status(&status, self.services.is_available());
        self.services.send(target, Reply::text(text)).await
    }
}
