//! Rate limiter types and data structures

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::time::Instant;

/// Rate limit result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    /// Whether the request is allowed
    pub allowed: bool,
    /// Calls inside the window, including this one when allowed
    pub current_count: u32,
    /// Maximum calls allowed per window
    pub limit: u32,
    /// Remaining calls in the window
    pub remaining: u32,
    /// Time until the oldest call in the window expires (only set when denied)
    pub retry_after: Option<Duration>,
}

/// Admission timestamps for one key
#[derive(Debug, Default)]
pub(super) struct RateLimitEntry {
    pub(super) timestamps: Mutex<VecDeque<Instant>>,
}
