//! Bot runtime lifecycle

use super::dispatcher::Dispatcher;
use super::event::InboundEvent;
use crate::config::Config;
use crate::core::OllamaClient;
use crate::features::Services;
use crate::messaging::{Conversation, Messenger, Reply};
use crate::storage::Ledger;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Owns the services and their background tasks
pub struct BotRuntime {
    services: Arc<Services>,
    dispatcher: Arc<Dispatcher>,
}

impl BotRuntime {
    /// Connect to Ollama and the ledger database and build every service
    pub async fn build(config: Config, messenger: Arc<dyn Messenger>) -> Result<Self> {
        info!("Initializing bot '{}'", config.bot.name);

        let client = Arc::new(OllamaClient::new(
            config.ollama.base_url.clone(),
            config.monitoring.health.timeout(),
        )?);

        let ledger = Ledger::connect(&config.storage.database).await?;
        ledger.migrate().await?;

        let services = Services::new(config, messenger, client.clone(), client, ledger)?;
        Ok(Self::from_services(services))
    }

    /// Runtime over already constructed services
    pub fn from_services(services: Services) -> Self {
        let services = Arc::new(services);
        Self {
            dispatcher: Arc::new(Dispatcher::new(services.clone())),
            services,
        }
    }

    pub fn services(&self) -> &Arc<Services> {
        &self.services
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Handle one event, logging instead of propagating delivery failures
    pub async fn handle(&self, event: InboundEvent) {
        if let Err(e) = self.dispatcher.dispatch(event).await {
            error!("Failed to handle event: {}", e);
        }
    }

    /// Probe the model server, start background tasks and announce startup
    pub async fn start(&self) {
        let probe = self.services.availability.check_now().await;
        self.services.availability.start();
        self.services.performance.start();

        let prefix = self.services.prefix();
        let message = if probe.status.allows_requests() {
            format!("{}Bot started! Send /help to see what I can do.", prefix)
        } else {
            warn!("Model server unreachable at startup, AI features on standby");
            format!(
                "{}Bot started, but the model server is not reachable yet. \
                 AI features will resume once it is back.",
                prefix
            )
        };
        self.broadcast(&message).await;
        info!("Bot runtime started");
    }

    /// Send `message` to every notice target; returns how many succeeded
    pub async fn broadcast(&self, message: &str) -> usize {
        if !self.services.switches.notices_enabled() {
            return 0;
        }

        let mut delivered = 0;
        for target in &self.services.config.bot.notice_targets {
            let conversation = Conversation::from(target);
            match self
                .services
                .send(&conversation, Reply::text(message))
                .await
            {
                Ok(()) => delivered += 1,
                Err(e) => error!("Failed to send notice to {}: {}", conversation, e),
            }
        }
        delivered
    }

    /// Announce shutdown, stop background tasks and refuse new work
    pub async fn shutdown(&self) {
        info!("Shutting down bot runtime");
        let goodbye = format!("{}Going offline now, thanks for chatting!", self.services.prefix());
        self.broadcast(&goodbye).await;

        self.services.availability.stop().await;
        self.services.performance.stop().await;
        self.services.runner.close();

        let stats = self.services.runner.get_stats();
        info!(
            active = stats.active,
            completed = stats.completed,
            failed = stats.failed,
            "Task runner closed"
        );
        self.services.performance.log_summary();
    }
}
