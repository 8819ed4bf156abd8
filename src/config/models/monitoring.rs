//! Monitoring configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MonitoringConfig {
    /// Model server availability probe
    #[serde(default)]
    pub health: HealthConfig,
    /// Operation timing
    #[serde(default)]
    pub performance: PerformanceConfig,
    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Availability probe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Seconds between probes
    #[serde(default = "default_health_interval")]
    pub interval: u64,
    /// Probe timeout in seconds
    #[serde(default = "default_probe_timeout")]
    pub timeout: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            interval: default_health_interval(),
            timeout: default_probe_timeout(),
        }
    }
}

impl HealthConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Performance monitor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Seconds between summary log lines
    #[serde(default = "default_summary_interval")]
    pub summary_interval: u64,
    /// Recent records kept in memory
    #[serde(default = "default_max_records")]
    pub max_records: usize,
    /// Record age limit in seconds
    #[serde(default = "default_record_ttl")]
    pub record_ttl: u64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            summary_interval: default_summary_interval(),
            max_records: default_max_records(),
            record_ttl: default_record_ttl(),
        }
    }
}

impl PerformanceConfig {
    pub fn summary_interval(&self) -> Duration {
        Duration::from_secs(self.summary_interval)
    }

    pub fn record_ttl(&self) -> Duration {
        Duration::from_secs(self.record_ttl)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
