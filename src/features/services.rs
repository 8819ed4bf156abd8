//! Shared service container

use crate::config::Config;
use crate::core::health::{AvailabilityMonitor, AvailabilityProbe, HealthMonitorConfig};
use crate::core::{
    ChatBackend, ContentFilter, ConversationStore, LockManager, LockManagerConfig, RateLimiter,
    StreamingReader, TaskRunner,
};
use crate::core::streaming::StreamingConfig;
use crate::messaging::{Conversation, Messenger, Reply};
use crate::monitoring::PerformanceMonitor;
use crate::storage::Ledger;
use crate::utils::error::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Runtime on/off switches changed by admin commands
#[derive(Debug)]
pub struct Switches {
    bot_enabled: AtomicBool,
    notices_enabled: AtomicBool,
}

impl Switches {
    pub fn new(notices_enabled: bool) -> Self {
        Self {
            bot_enabled: AtomicBool::new(true),
            notices_enabled: AtomicBool::new(notices_enabled),
        }
    }

    pub fn bot_enabled(&self) -> bool {
        self.bot_enabled.load(Ordering::SeqCst)
    }

    pub fn set_bot_enabled(&self, enabled: bool) {
        self.bot_enabled.store(enabled, Ordering::SeqCst);
    }

    pub fn notices_enabled(&self) -> bool {
        self.notices_enabled.load(Ordering::SeqCst)
    }

    pub fn set_notices_enabled(&self, enabled: bool) {
        self.notices_enabled.store(enabled, Ordering::SeqCst);
    }
}

/// Every long-lived service, constructed once per process
pub struct Services {
    pub config: Arc<Config>,
    pub messenger: Arc<dyn Messenger>,
    pub reader: Arc<StreamingReader>,
    pub availability: Arc<AvailabilityMonitor>,
    pub runner: Arc<TaskRunner>,
    pub locks: Arc<LockManager>,
    pub conversations: Arc<ConversationStore>,
    pub ledger: Arc<Ledger>,
    pub performance: Arc<PerformanceMonitor>,
    pub ai_limiter: Arc<RateLimiter>,
    pub ledger_limiter: Arc<RateLimiter>,
    pub welcome_limiter: Arc<RateLimiter>,
    pub switches: Arc<Switches>,
}

impl Services {
    /// Wire up all services from configuration and the external collaborators
    pub fn new(
        config: Config,
        messenger: Arc<dyn Messenger>,
        backend: Arc<dyn ChatBackend>,
        probe: Arc<dyn AvailabilityProbe>,
        ledger: Ledger,
    ) -> Result<Self> {
        let filter = Arc::new(ContentFilter::from_config(&config.filter)?);
        let reader = Arc::new(StreamingReader::new(
            backend,
            StreamingConfig::from(&config.ollama),
            filter,
        ));
        let availability = Arc::new(AvailabilityMonitor::new(
            probe,
            HealthMonitorConfig::from(&config.monitoring.health),
        ));

        let services = Self {
            messenger,
            reader,
            availability,
            runner: Arc::new(TaskRunner::new("bot", config.concurrency.max_concurrent)),
            locks: Arc::new(LockManager::new(LockManagerConfig::from(&config.concurrency))),
            conversations: Arc::new(ConversationStore::new(&config.conversation)),
            ledger: Arc::new(ledger),
            performance: Arc::new(PerformanceMonitor::new(
                config.monitoring.performance.clone(),
            )),
            ai_limiter: Arc::new(RateLimiter::new("ai", config.rate_limits.ai.clone())),
            ledger_limiter: Arc::new(RateLimiter::new(
                "ledger",
                config.rate_limits.ledger.clone(),
            )),
            welcome_limiter: Arc::new(RateLimiter::new(
                "welcome",
                config.rate_limits.welcome.clone(),
            )),
            switches: Arc::new(Switches::new(config.bot.notices_enabled)),
            config: Arc::new(config),
        };
        debug!("Services constructed");
        Ok(services)
    }

    /// Reply prefix from configuration
    pub fn prefix(&self) -> &str {
        &self.config.bot.prefix
    }

    pub fn is_available(&self) -> bool {
        self.availability.is_available()
    }

    pub async fn send(&self, target: &Conversation, reply: Reply) -> Result<()> {
        self.messenger.send(target, reply).await
    }
}
