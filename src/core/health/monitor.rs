//! Availability monitor implementation

use super::types::{HealthCheckResult, HealthStatus};
use crate::config::models::HealthConfig;
use crate::utils::error::Result;
use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Something that can tell whether the model server is up
#[async_trait]
pub trait AvailabilityProbe: Send + Sync {
    /// Ok when the server is reachable and serving models
    async fn probe(&self) -> Result<()>;
}

/// Health monitor configuration
#[derive(Debug, Clone)]
pub struct HealthMonitorConfig {
    /// Interval between health checks
    pub check_interval: Duration,
    /// Timeout for individual health checks
    pub check_timeout: Duration,
}

impl Default for HealthMonitorConfig {
    fn default() -> Self {
        Self {
            check_interval: Duration::from_secs(30),
            check_timeout: Duration::from_secs(2),
        }
    }
}

impl From<&HealthConfig> for HealthMonitorConfig {
    fn from(config: &HealthConfig) -> Self {
        Self {
            check_interval: config.interval(),
            check_timeout: config.timeout(),
        }
    }
}

/// Periodic availability probe with a start/stop lifecycle
///
/// The server counts as unavailable until the first probe succeeds.
pub struct AvailabilityMonitor {
    config: HealthMonitorConfig,
    probe: Arc<dyn AvailabilityProbe>,
    available: AtomicBool,
    last_result: RwLock<Option<HealthCheckResult>>,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl AvailabilityMonitor {
    /// Create a new monitor
    pub fn new(probe: Arc<dyn AvailabilityProbe>, config: HealthMonitorConfig) -> Self {
        Self {
            config,
            probe,
            available: AtomicBool::new(false),
            last_result: RwLock::new(None),
            cancel: CancellationToken::new(),
            task: Mutex::new(None),
        }
    }

    /// Current availability flag
    pub fn is_available(&self) -> bool {
        self.available.load(Ordering::SeqCst)
    }

    /// Result of the most recent probe
    pub fn last_result(&self) -> Option<HealthCheckResult> {
        self.last_result.read().clone()
    }

    /// Probe once and update the flag, logging transitions
    pub async fn check_now(&self) -> HealthCheckResult {
        let started = Instant::now();
        let outcome = tokio::time::timeout(self.config.check_timeout, self.probe.probe()).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let result = match outcome {
            Ok(Ok(())) => HealthCheckResult::healthy(elapsed_ms),
            Ok(Err(e)) => HealthCheckResult::unhealthy(e.to_string(), elapsed_ms),
            Err(_) => HealthCheckResult::unhealthy(
                format!("Probe timed out after {:?}", self.config.check_timeout),
                elapsed_ms,
            ),
        };

        let now_available = result.status.allows_requests();
        let was_available = self.available.swap(now_available, Ordering::SeqCst);
        match (was_available, now_available) {
            (false, true) => info!("Model server is available ({}ms)", elapsed_ms),
            (true, false) => warn!(
                "Model server became unavailable: {}",
                result.error.as_deref().unwrap_or("unknown error")
            ),
            _ => debug!("Model server status unchanged: {:?}", result.status),
        }

        *self.last_result.write() = Some(result.clone());
        result
    }

    /// Start the periodic probe task
    ///
    /// The first probe runs immediately unless `check_now` already produced a
    /// result.
    pub fn start(self: &Arc<Self>) {
        let mut task = self.task.lock();
        if task.is_some() {
            debug!("Availability monitor already running");
            return;
        }

        let monitor = Arc::clone(self);
        let cancel = self.cancel.clone();
        *task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(monitor.config.check_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            if monitor.last_result().is_some() {
                interval.tick().await;
            }

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = interval.tick() => {
                        monitor.check_now().await;
                    }
                }
            }
            debug!("Availability monitor stopped");
        }));
        info!(
            "Availability monitor started (every {:?})",
            self.config.check_interval
        );
    }

    /// Stop the probe task and wait for it to exit
    pub async fn stop(&self) {
        self.cancel.cancel();
        let task = self.task.lock().take();
        if let Some(task) = task {
            let _ = task.await;
        }
    }

    pub fn status(&self) -> HealthStatus {
        if self.is_available() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        }
    }
}
