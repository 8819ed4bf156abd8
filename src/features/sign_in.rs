//! Points and daily sign-in commands

use super::Services;
use crate::messaging::{Conversation, Reply};
use crate::storage::database::{BackfillOutcome, LeaderboardEntry, PointsChange, SignInOutcome};
use crate::utils::error::{BotError, Result, RetryConfig, RetryPolicy};
use chrono::NaiveDate;
use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};

const TOO_FREQUENT: &str = "You are doing that too often, please try again later.";

/// Calendar day used for sign-ins
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn format_leaderboard(entries: &[LeaderboardEntry]) -> String {
    if entries.is_empty() {
        return "No one in this group has any points yet.".to_string();
    }
    let mut text = String::from("Points leaderboard\n");
    for (rank, entry) in entries.iter().enumerate() {
        text.push_str(&format!(
            "{}. {}: {} points\n",
            rank + 1,
            entry.username,
            entry.points
        ));
    }
    text.trim_end().to_string()
}

pub fn format_history(changes: &[PointsChange]) -> String {
    if changes.is_empty() {
        return "No point changes yet.".to_string();
    }
    let mut text = String::from("Recent point changes\n");
    for change in changes {
        text.push_str(&format!(
            "{:+} {} ({})\n",
            change.change,
            change.reason,
            change.at.format("%Y-%m-%d %H:%M")
        ));
    }
    text.trim_end().to_string()
}

/// Ledger commands for one group member
pub struct SignInService {
    services: Arc<Services>,
    retry: RetryPolicy,
}

impl SignInService {
    pub fn new(services: Arc<Services>) -> Self {
        let retry = RetryPolicy::new(RetryConfig::from(&services.config.retry.ledger))
            .with_name("ledger");
        Self { services, retry }
    }

    pub fn enabled(&self) -> bool {
        self.services.switches.bot_enabled()
    }

    /// Turn ledger commands on or off
    pub async fn set_enabled(&self, target: &Conversation, enabled: bool) -> Result<()> {
        self.services.switches.set_bot_enabled(enabled);
        info!("Ledger commands {}", if enabled { "enabled" } else { "disabled" });
        let text = if enabled {
            "(Bot enabled, sign-in and points commands are available again.)"
        } else {
            "(Bot disabled, sign-in and points commands are paused.)"
        };
        self.services.send(target, Reply::text(text)).await
    }

    /// Rate-limit, run on the task runner under the member's lock, with retry
    async fn run_locked<T, F, Fut>(
        &self,
        operation: &str,
        user_id: &str,
        group_id: &str,
        f: F,
    ) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let lock = self.services.locks.user_lock(user_id, group_id);
        self.services
            .runner
            .execute(async {
                let _guard = lock.lock().await;
                self.services
                    .performance
                    .track(operation, self.retry.call_if(&f, BotError::is_transient))
                    .await
            })
            .await
    }

    fn admit(&self, key: String) -> bool {
        self.services.ledger_limiter.acquire(&key)
    }

    fn failure(&self, operation: &str, user_id: &str, e: &BotError) -> String {
        warn!(user_id, operation, "Ledger operation failed: {}", e);
        e.category().user_message().to_string()
    }

    pub async fn sign(
        &self,
        target: &Conversation,
        user_id: &str,
        group_id: &str,
        username: &str,
    ) -> Result<()> {
        if !self.enabled() {
            return Ok(());
        }
        if !self.admit(format!("sign:{}:{}", user_id, group_id)) {
            return self
                .services
                .send(target, Reply::mention(user_id, TOO_FREQUENT))
                .await;
        }

        let day = today();
        let ledger = &self.services.ledger;
        let outcome = self
            .run_locked("sign_in", user_id, group_id, move || {
                ledger.sign_in(user_id, group_id, username, day)
            })
            .await;

        let text = match outcome {
            Ok(SignInOutcome::Signed(receipt)) => format!(
                "Signed in! +{} points\n• Streak: {} days\n• Total sign-ins: {} days\n• Balance: {} points",
                receipt.earned, receipt.streak, receipt.total_days, receipt.balance
            ),
            Ok(SignInOutcome::AlreadySigned) => {
                "You already signed in today, come back tomorrow!".to_string()
            }
            Err(e) => self.failure("sign_in", user_id, &e),
        };
        self.services
            .send(target, Reply::mention(user_id, text))
            .await
    }

    pub async fn points(&self, target: &Conversation, user_id: &str, group_id: &str) -> Result<()> {
        if !self.enabled() {
            return Ok(());
        }
        if !self.admit(format!("points:{}:{}", user_id, group_id)) {
            return self
                .services
                .send(target, Reply::mention(user_id, TOO_FREQUENT))
                .await;
        }

        let ledger = &self.services.ledger;
        let text = match self
            .services
            .runner
            .execute(ledger.balance(user_id, group_id))
            .await
        {
            Ok(points) => format!("You have {} points.", points),
            Err(e) => self.failure("points", user_id, &e),
        };
        self.services
            .send(target, Reply::mention(user_id, text))
            .await
    }

    pub async fn leaderboard(
        &self,
        target: &Conversation,
        group_id: &str,
        limit: Option<u64>,
    ) -> Result<()> {
        if !self.enabled() {
            return Ok(());
        }
        if !self.admit(format!("rank:{}", group_id)) {
            return self.services.send(target, Reply::text(TOO_FREQUENT)).await;
        }

        let ledger = &self.services.ledger;
        let text = match self
            .services
            .runner
            .execute(ledger.leaderboard(group_id, limit))
            .await
        {
            Ok(entries) => format_leaderboard(&entries),
            Err(e) => self.failure("leaderboard", group_id, &e),
        };
        self.services.send(target, Reply::text(text)).await
    }

    pub async fn backfill(
        &self,
        target: &Conversation,
        user_id: &str,
        group_id: &str,
        username: &str,
    ) -> Result<()> {
        if !self.enabled() {
            return Ok(());
        }
        if !self.admit(format!("backfill:{}:{}", user_id, group_id)) {
            return self
                .services
                .send(target, Reply::mention(user_id, TOO_FREQUENT))
                .await;
        }

        let day = today();
        let ledger = &self.services.ledger;
        let outcome = self
            .run_locked("backfill", user_id, group_id, move || {
                ledger.backfill(user_id, group_id, username, day)
            })
            .await;

        let text = match outcome {
            Ok(BackfillOutcome::Backfilled {
                date,
                cost,
                balance,
            }) => format!(
                "Backfilled {}. {} points spent, {} points left.",
                date, cost, balance
            ),
            Ok(BackfillOutcome::InsufficientPoints { required, balance }) => format!(
                "Not enough points! A backfill costs {} points and you have {}.",
                required, balance
            ),
            Ok(BackfillOutcome::NothingToBackfill) => "There is no day to backfill.".to_string(),
            Err(e) => self.failure("backfill", user_id, &e),
        };
        self.services
            .send(target, Reply::mention(user_id, text))
            .await
    }

    pub async fn history(
        &self,
        target: &Conversation,
        user_id: &str,
        group_id: &str,
        limit: Option<u64>,
    ) -> Result<()> {
        if !self.enabled() {
            return Ok(());
        }
        if !self.admit(format!("history:{}:{}", user_id, group_id)) {
            return self
                .services
                .send(target, Reply::mention(user_id, TOO_FREQUENT))
                .await;
        }

        let ledger = &self.services.ledger;
        let text = match self
            .services
            .runner
            .execute(ledger.history(user_id, group_id, limit))
            .await
        {
            Ok(changes) => format_history(&changes),
            Err(e) => self.failure("history", user_id, &e),
        };
        self.services
            .send(target, Reply::mention(user_id, text))
            .await
    }
}
