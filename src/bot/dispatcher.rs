//! Event dispatcher

use super::command::{Command, help_lines};
use super::event::InboundEvent;
use crate::config::models::ReplyMode;
use crate::features::{ChatService, Services, SignInService, WelcomeService};
use crate::messaging::{Conversation, Reply};
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Routes inbound events to the feature services
pub struct Dispatcher {
    services: Arc<Services>,
    chat: ChatService,
    welcome: WelcomeService,
    sign_in: SignInService,
}

impl Dispatcher {
    pub fn new(services: Arc<Services>) -> Self {
        Self {
            chat: ChatService::new(services.clone()),
            welcome: WelcomeService::new(services.clone()),
            sign_in: SignInService::new(services.clone()),
            services,
        }
    }

    pub fn chat(&self) -> &ChatService {
        &self.chat
    }

    pub fn sign_in(&self) -> &SignInService {
        &self.sign_in
    }

    pub async fn dispatch(&self, event: InboundEvent) -> Result<()> {
        match event {
            InboundEvent::MemberJoined {
                group_id,
                group_name,
                user_id,
                user_name,
            } => {
                self.welcome
                    .on_member_joined(&group_id, &user_id, &user_name, &group_name)
                    .await
            }
            InboundEvent::Message {
                conversation,
                user_id,
                user_name,
                text,
                to_me,
                quoted,
            } => match Command::parse(&text) {
                Some(command) => {
                    self.run_command(command, &conversation, &user_id, &user_name, quoted.as_deref())
                        .await
                }
                None => {
                    if conversation.group_id().is_some() && !to_me {
                        return Ok(());
                    }
                    self.plain_message(&conversation, &user_id, &text, quoted.as_deref())
                        .await
                }
            },
        }
    }

    async fn plain_message(
        &self,
        target: &Conversation,
        user_id: &str,
        text: &str,
        quoted: Option<&str>,
    ) -> Result<()> {
        match self.services.config.bot.default_mode {
            ReplyMode::Chat => self.chat.chat(target, user_id, text).await,
            ReplyMode::Code if text.trim().is_empty() => self.chat.chat(target, user_id, text).await,
            ReplyMode::Code => self.chat.code(target, user_id, text, quoted).await,
        }
    }

    async fn run_command(
        &self,
        command: Command,
        target: &Conversation,
        user_id: &str,
        user_name: &str,
        quoted: Option<&str>,
    ) -> Result<()> {
        debug!(user_id, conversation = %target, "Command {:?}", command);

        if command.needs_group() && target.group_id().is_none() {
            return self
                .services
                .send(target, Reply::text("(This command only works in group chats.)"))
                .await;
        }
        let group_id = target.group_id().unwrap_or_default();

        match command {
            Command::Help => {
                let lines = help_lines(&self.services.config.bot.name);
                self.services
                    .send(target, Reply::forward(self.services.prefix(), &lines))
                    .await
            }
            Command::Memory(true) => self.chat.memory_on(target, user_id).await,
            Command::Memory(false) => self.chat.memory_off(target, user_id).await,
            Command::Forget => self.chat.forget(target, user_id).await,
            Command::Status => self.chat.status(target, user_id).await,
            Command::Write(prompt) => self.chat.write(target, user_id, &prompt, quoted).await,
            Command::Code(prompt) => self.chat.code(target, user_id, &prompt, quoted).await,
            Command::Ctf(prompt) => self.chat.ctf(target, user_id, &prompt, quoted).await,
            Command::Sign => self.sign_in.sign(target, user_id, group_id, user_name).await,
            Command::Points => self.sign_in.points(target, user_id, group_id).await,
            Command::Rank(limit) => self.sign_in.leaderboard(target, group_id, limit).await,
            Command::Backfill => {
                self.sign_in
                    .backfill(target, user_id, group_id, user_name)
                    .await
            }
            Command::History(limit) => {
                self.sign_in
                    .history(target, user_id, group_id, limit)
                    .await
            }
            Command::Notice(enabled) => {
                self.services.switches.set_notices_enabled(enabled);
                info!("Startup notices {}", if enabled { "enabled" } else { "disabled" });
                let text = if enabled {
                    "(Notices on, I will announce startup and shutdown.)"
                } else {
                    "(Notices off, startup and shutdown will be quiet.)"
                };
                self.services.send(target, Reply::text(text)).await
            }
            Command::Bot(enabled) => self.sign_in.set_enabled(target, enabled).await,
            Command::Unknown(name) => {
                debug!("Ignoring unknown command /{}", name);
                Ok(())
            }
        }
    }
}
