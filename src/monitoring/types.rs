//! Monitoring types

use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

/// One timed operation
#[derive(Debug, Clone)]
pub struct OperationRecord {
    pub operation: String,
    pub duration: Duration,
    pub success: bool,
    pub error: Option<String>,
    pub finished_at: Instant,
}

/// Aggregated counters for one operation name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OperationStats {
    pub count: u64,
    pub successes: u64,
    pub errors: u64,
    pub total_duration: Duration,
    pub min_duration: Option<Duration>,
    pub max_duration: Option<Duration>,
}

impl OperationStats {
    pub(super) fn record(&mut self, duration: Duration, success: bool) {
        self.count += 1;
        if success {
            self.successes += 1;
        } else {
            self.errors += 1;
        }
        self.total_duration += duration;
        self.min_duration = Some(self.min_duration.map_or(duration, |d| d.min(duration)));
        self.max_duration = Some(self.max_duration.map_or(duration, |d| d.max(duration)));
    }

    /// Fraction of successful calls, 0.0 when nothing was recorded
    pub fn success_rate(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.successes as f64 / self.count as f64
        }
    }

    pub fn average_duration(&self) -> Duration {
        if self.count == 0 {
            Duration::ZERO
        } else {
            self.total_duration / self.count as u32
        }
    }
}
