//! Rate Limiting Implementation
//!
//! Provides keyed sliding window rate limiting. Each limiter is an ordinary
//! value owned by the service that uses it; features hold separate limiters
//! with their own limits.

mod limiter;
mod types;


// Re-export public types
pub use limiter::RateLimiter;
pub use types::RateLimitResult;
