//! Performance monitor implementation

use super::bounded::BoundedPush;
use super::types::{OperationRecord, OperationStats};
use crate::config::models::PerformanceConfig;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

#[derive(Debug, Default)]
struct MonitorState {
    stats: HashMap<String, OperationStats>,
    records: VecDeque<OperationRecord>,
}

/// Times operations and keeps per-name statistics
pub struct PerformanceMonitor {
    config: PerformanceConfig,
    state: Mutex<MonitorState>,
    cancel: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl PerformanceMonitor {
    pub fn new(config: PerformanceConfig) -> Self {
        Self {
            config,
            state: Mutex::new(MonitorState::default()),
            cancel: CancellationToken::new(),
            task: Mutex::new(None),
        }
    }

    pub fn enabled(&self) -> bool {
        self.config.enabled
    }

    /// Run `fut` and record its duration and outcome under `operation`
    pub async fn track<F, T, E>(&self, operation: &str, fut: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        if !self.config.enabled {
            return fut.await;
        }

        let started = Instant::now();
        let result = fut.await;
        let error = result.as_ref().err().map(|e| e.to_string());
        self.record(operation, started.elapsed(), error);
        result
    }

    /// Record a finished operation
    pub fn record(&self, operation: &str, duration: Duration, error: Option<String>) {
        let success = error.is_none();
        let mut state = self.state.lock();

        state
            .stats
            .entry(operation.to_string())
            .or_default()
            .record(duration, success);

        let max_records = self.config.max_records;
        state.records.push_bounded(
            OperationRecord {
                operation: operation.to_string(),
                duration,
                success,
                error,
                finished_at: Instant::now(),
            },
            max_records,
        );
    }

    pub fn stats(&self, operation: &str) -> Option<OperationStats> {
        self.state.lock().stats.get(operation).cloned()
    }

    pub fn all_stats(&self) -> HashMap<String, OperationStats> {
        self.state.lock().stats.clone()
    }

    pub fn success_rate(&self, operation: &str) -> f64 {
        self.stats(operation)
            .map(|s| s.success_rate())
            .unwrap_or(0.0)
    }

    pub fn average_duration(&self, operation: &str) -> Duration {
        self.stats(operation)
            .map(|s| s.average_duration())
            .unwrap_or(Duration::ZERO)
    }

    /// Most recent records, oldest first
    pub fn recent_records(&self) -> Vec<OperationRecord> {
        self.state.lock().records.iter().cloned().collect()
    }

    /// Drop records older than the configured age limit
    pub fn cleanup_records(&self) -> usize {
        let ttl = self.config.record_ttl();
        let now = Instant::now();
        let mut state = self.state.lock();
        let before = state.records.len();
        state
            .records
            .retain(|r| now.duration_since(r.finished_at) <= ttl);
        before - state.records.len()
    }

    /// Log one line per operation
    pub fn log_summary(&self) {
        let mut stats: Vec<_> = self.all_stats().into_iter().collect();
        if stats.is_empty() {
            debug!("No operations recorded yet");
            return;
        }
        stats.sort_by(|a, b| a.0.cmp(&b.0));

        for (operation, s) in stats {
            info!(
                operation = %operation,
                count = s.count,
                errors = s.errors,
                "avg {:?}, min {:?}, max {:?}, success {:.1}%",
                s.average_duration(),
                s.min_duration.unwrap_or_default(),
                s.max_duration.unwrap_or_default(),
                s.success_rate() * 100.0
            );
        }
    }

    /// Start the periodic summary task
    pub fn start(self: &Arc<Self>) {
        if !self.config.enabled {
            debug!("Performance monitor disabled");
            return;
        }

        let mut task = self.task.lock();
        if task.is_some() {
            return;
        }

        let monitor = Arc::clone(self);
        let cancel = self.cancel.clone();
        let period = self.config.summary_interval();
        *task = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = interval.tick() => {
                        let dropped = monitor.cleanup_records();
                        if dropped > 0 {
                            debug!("Dropped {} expired performance records", dropped);
                        }
                        monitor.log_summary();
                    }
                }
            }
        }));
        info!("Performance summary every {:?}", period);
    }

    /// Stop the summary task
    pub async fn stop(&self) {
        self.cancel.cancel();
        let task = self.task.lock().take();
        if let Some(task) = task {
            let _ = task.await;
        }
    }
}
