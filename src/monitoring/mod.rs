//! Monitoring and observability
//!
//! Per-operation timing with a periodic summary log line. Model server
//! availability lives in `core::health`.

mod bounded;
mod performance;
mod types;

pub use performance::PerformanceMonitor;
pub use types::{OperationRecord, OperationStats};
