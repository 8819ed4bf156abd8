//! Expiring keyed registry
//!
//! Shared storage for per-key state (rate limit windows, lock objects) with
//! idle sweeping and bulk eviction of the least recently used entries.

mod expiring;


pub use expiring::{ExpiringRegistry, RegistryConfig};
