//! Task runner types

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Snapshot of task runner counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    /// Tasks currently holding a slot
    pub active: usize,
    /// Tasks that returned Ok
    pub completed: u64,
    /// Tasks that returned Err, panicked or were dropped before finishing
    pub failed: u64,
    /// Slot count
    pub max_concurrent: usize,
}

#[derive(Debug, Default)]
pub(super) struct TaskCounters {
    pub(super) active: AtomicUsize,
    pub(super) completed: AtomicU64,
    pub(super) failed: AtomicU64,
}

/// Marks a task active for its lifetime; the outcome is counted on drop
pub(super) struct ActiveTaskGuard<'a> {
    counters: &'a TaskCounters,
    succeeded: Option<bool>,
}

impl<'a> ActiveTaskGuard<'a> {
    pub(super) fn new(counters: &'a TaskCounters) -> Self {
        counters.active.fetch_add(1, Ordering::SeqCst);
        Self {
            counters,
            succeeded: None,
        }
    }

    pub(super) fn finish(&mut self, succeeded: bool) {
        self.succeeded = Some(succeeded);
    }
}

impl Drop for ActiveTaskGuard<'_> {
    fn drop(&mut self) {
        match self.succeeded {
            Some(true) => self.counters.completed.fetch_add(1, Ordering::SeqCst),
            _ => self.counters.failed.fetch_add(1, Ordering::SeqCst),
        };
        self.counters.active.fetch_sub(1, Ordering::SeqCst);
    }
}
