//! Model server availability monitoring
//!
//! A background task probes the model server on a fixed interval and keeps an
//! availability flag that generation features consult before doing work.

mod monitor;
mod types;


pub use monitor::{AvailabilityMonitor, AvailabilityProbe, HealthMonitorConfig};
pub use types::{HealthCheckResult, HealthStatus};
