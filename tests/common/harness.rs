//! Fully wired bot over test doubles

use super::backend::{ScriptedBackend, StaticProbe};
use super::database::TestDatabase;
use super::messenger::RecordingMessenger;
use llmbot::bot::BotRuntime;
use llmbot::config::Config;
use llmbot::features::Services;
use llmbot::{Dispatcher, InboundEvent};
use std::sync::Arc;

pub struct TestBot {
    pub runtime: BotRuntime,
    pub messenger: Arc<RecordingMessenger>,
    pub backend: Arc<ScriptedBackend>,
    pub probe: Arc<StaticProbe>,
    pub db: TestDatabase,
}

impl TestBot {
    /// Configuration with fast retries
    pub fn config() -> Config {
        let mut config = Config::default();
        config.retry.generation.base_delay_ms = 1;
        config.retry.ledger.base_delay_ms = 1;
        config
    }

    /// Bot with an available model server
    pub async fn new(backend: Arc<ScriptedBackend>) -> Self {
        Self::with_config(Self::config(), backend, true).await
    }

    pub async fn with_config(config: Config, backend: Arc<ScriptedBackend>, up: bool) -> Self {
        let messenger = RecordingMessenger::new();
        let probe = StaticProbe::new(up);
        let db = TestDatabase::new().await;

        let services = Services::new(
            config,
            messenger.clone(),
            backend.clone(),
            probe.clone(),
            db.ledger_owned(),
        )
        .expect("Failed to build services");
        services.availability.check_now().await;

        Self {
            runtime: BotRuntime::from_services(services),
            messenger,
            backend,
            probe,
            db,
        }
    }

    pub fn services(&self) -> &Arc<Services> {
        self.runtime.services()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        self.runtime.dispatcher()
    }

    /// Dispatch and fail the test on delivery errors
    pub async fn send(&self, event: InboundEvent) {
        self.dispatcher()
            .dispatch(event)
            .await
            .expect("dispatch failed");
    }

    /// Private message from `user`
    pub async fn say(&self, user: &str, text: &str) {
        self.send(InboundEvent::private(user, text)).await;
    }

    /// Rendered text of the last reply
    pub fn last_text(&self) -> String {
        self.messenger
            .last()
            .map(|r| r.render())
            .unwrap_or_default()
    }
}
