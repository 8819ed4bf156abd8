//! Error recovery utilities
//!
//! This module provides the retry/backoff wrapper used around model calls and
//! ledger operations.

mod retry;
mod types;

pub use retry::RetryPolicy;
pub use types::RetryConfig;
