//! Task runner implementation

use super::types::{ActiveTaskGuard, TaskCounters, TaskStats};
use crate::utils::error::{BotError, Result};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::debug;

/// Runs tasks with at most `max_concurrent` in flight
///
/// A slot is held from the moment the task starts until it returns, fails,
/// panics or is cancelled; counters are updated on every one of those paths.
pub struct TaskRunner {
    name: String,
    semaphore: Arc<Semaphore>,
    max_concurrent: usize,
    counters: TaskCounters,
}

impl TaskRunner {
    /// Create a new task runner
    pub fn new(name: impl Into<String>, max_concurrent: usize) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            name: name.into(),
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
            max_concurrent,
            counters: TaskCounters::default(),
        }
    }

    /// Wait for a slot, run `task` and return its result unchanged
    pub async fn execute<F, T, E>(&self, task: F) -> std::result::Result<T, E>
    where
        F: Future<Output = std::result::Result<T, E>>,
        E: From<BotError>,
    {
        let _permit = self.semaphore.acquire().await.map_err(|_| {
            E::from(BotError::unavailable(format!(
                "Task runner '{}' is shut down",
                self.name
            )))
        })?;

        let mut guard = ActiveTaskGuard::new(&self.counters);
        debug!(
            "Task runner '{}' started task ({} active)",
            self.name,
            self.counters.active.load(Ordering::SeqCst)
        );

        let result = task.await;
        guard.finish(result.is_ok());
        result
    }

    /// Run `task` in the background on this runner
    pub fn spawn<F, T>(self: &Arc<Self>, task: F) -> JoinHandle<Result<T>>
    where
        F: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let runner = self.clone();
        tokio::spawn(async move { runner.execute(task).await })
    }

    /// Counter snapshot
    pub fn get_stats(&self) -> TaskStats {
        TaskStats {
            active: self.counters.active.load(Ordering::SeqCst),
            completed: self.counters.completed.load(Ordering::SeqCst),
            failed: self.counters.failed.load(Ordering::SeqCst),
            max_concurrent: self.max_concurrent,
        }
    }

    /// Free slots right now
    pub fn available_permits(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Maximum concurrent tasks
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Refuse new tasks; running ones finish normally
    pub fn close(&self) {
        self.semaphore.close();
    }

    pub fn is_closed(&self) -> bool {
        self.semaphore.is_closed()
    }
}
