//! Keyed lock manager
//!
//! Hands out one async mutex per key so that operations on the same resource
//! (a user's ledger row, a group) run one at a time while different keys
//! proceed in parallel.

mod manager;


pub use manager::{KeyLock, KeyLockGuard, LockManager, LockManagerConfig};
