//! Welcome messages for new group members

use super::Services;
use crate::core::ollama::{ChatMessage, ChatRequest};
use crate::messaging::{Conversation, Reply};
use crate::utils::error::{BotError, Result, RetryConfig, RetryPolicy};
use std::sync::Arc;
use tracing::{info, warn};

/// Greets new members, generating the text when the model server allows
pub struct WelcomeService {
    services: Arc<Services>,
    retry: RetryPolicy,
}

impl WelcomeService {
    pub fn new(services: Arc<Services>) -> Self {
        let retry = RetryPolicy::new(RetryConfig::from(&services.config.retry.generation))
            .with_name("welcome");
        Self { services, retry }
    }

    /// Text used whenever generation is skipped or fails
    pub fn fallback_text(&self) -> String {
        format!(
            "{}Welcome aboard! Please read the group announcement and follow the group rules.",
            self.services.prefix()
        )
    }

    pub async fn on_member_joined(
        &self,
        group_id: &str,
        user_id: &str,
        user_name: &str,
        group_name: &str,
    ) -> Result<()> {
        let key = format!("welcome:{}", group_id);
        if !self.services.welcome_limiter.acquire(&key) {
            info!(group_id, "Welcome rate limit reached, skipping greeting");
            return Ok(());
        }

        // Greetings in one group go out in join order
        let _guard = self.services.locks.group_lock(group_id).lock().await;
        let text = self
            .services
            .runner
            .execute(self.compose(user_name, group_name))
            .await
            .unwrap_or_else(|e| {
                warn!(group_id, user_id, "Welcome generation failed: {}", e);
                self.fallback_text()
            });

        self.services
            .send(&Conversation::group(group_id), Reply::mention(user_id, text))
            .await
    }

    async fn compose(&self, user_name: &str, group_name: &str) -> Result<String> {
        if !self.services.is_available() {
            return Ok(self.fallback_text());
        }

        let profile = &self.services.config.ollama.profiles.welcome;
        let prompt = format!(
            "Warmly welcome the new member {} to {}. Remind them to read the group \
             announcement. Keep it under 80 words.",
            user_name, group_name
        );
        let request = ChatRequest::new(
            profile.model.clone(),
            vec![
                ChatMessage::system(profile.system_prompt.clone()),
                ChatMessage::user(prompt),
            ],
        );
        let timeout = self.services.config.ollama.welcome_timeout();

        let outcome = self
            .services
            .performance
            .track(
                "welcome",
                self.retry.call_if(
                    || self.services.reader.complete(&request, timeout),
                    BotError::is_transient,
                ),
            )
            .await?;

        if outcome.is_empty() {
            Ok(self.fallback_text())
        } else {
            Ok(format!("{}{}", self.services.prefix(), outcome.text.trim()))
        }
    }
}
