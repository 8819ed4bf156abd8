//! Lock manager implementation

use crate::config::models::ConcurrencyConfig;
use crate::core::registry::{ExpiringRegistry, RegistryConfig};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Lock manager configuration
#[derive(Debug, Clone)]
pub struct LockManagerConfig {
    /// Registry size that triggers eviction of the oldest quarter
    pub max_locks: usize,
    /// Sweep interval; locks idle for twice this long are dropped
    pub cleanup_interval: Duration,
}

impl Default for LockManagerConfig {
    fn default() -> Self {
        Self {
            max_locks: 2000,
            cleanup_interval: Duration::from_secs(300),
        }
    }
}

impl From<&ConcurrencyConfig> for LockManagerConfig {
    fn from(config: &ConcurrencyConfig) -> Self {
        Self {
            max_locks: config.max_locks,
            cleanup_interval: config.lock_cleanup_interval(),
        }
    }
}

/// Handle to the mutex of one key
///
/// While a handle (or a guard obtained from it) is alive the registry keeps
/// the mutex, so every holder and waiter of a key shares one lock object.
#[derive(Clone)]
pub struct KeyLock {
    key: String,
    mutex: Arc<Mutex<()>>,
}

impl KeyLock {
    /// Key this lock belongs to
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Wait for exclusive access to the key
    pub async fn lock(&self) -> KeyLockGuard {
        KeyLockGuard {
            _guard: self.mutex.clone().lock_owned().await,
        }
    }

    /// Take the lock only if it is free right now
    #[cfg(test)]
    pub(crate) fn try_lock(&self) -> Option<KeyLockGuard> {
        self.mutex
            .clone()
            .try_lock_owned()
            .ok()
            .map(|guard| KeyLockGuard { _guard: guard })
    }

    /// Whether two handles refer to the same lock object
    pub fn same_lock(&self, other: &KeyLock) -> bool {
        Arc::ptr_eq(&self.mutex, &other.mutex)
    }
}

impl std::fmt::Debug for KeyLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyLock").field("key", &self.key).finish()
    }
}

/// Exclusive access to a key, released on drop
pub struct KeyLockGuard {
    _guard: OwnedMutexGuard<()>,
}

/// Registry of per-key async mutexes
pub struct LockManager {
    locks: ExpiringRegistry<Mutex<()>>,
}

impl LockManager {
    /// Create a new lock manager
    pub fn new(config: LockManagerConfig) -> Self {
        Self {
            locks: ExpiringRegistry::new(
                "lock",
                RegistryConfig {
                    idle_ttl: config.cleanup_interval * 2,
                    sweep_interval: config.cleanup_interval,
                    max_entries: config.max_locks,
                },
            ),
        }
    }

    /// Get (or create) the lock for `key`
    pub fn get_lock(&self, key: &str) -> KeyLock {
        KeyLock {
            key: key.to_string(),
            mutex: self.locks.get_or_create(key, || Mutex::new(())),
        }
    }

    /// Lock serializing ledger mutations of one user in one group
    pub fn user_lock(&self, user_id: &str, group_id: &str) -> KeyLock {
        self.get_lock(&format!("user:{}:{}", user_id, group_id))
    }

    /// Lock serializing group-wide operations
    pub fn group_lock(&self, group_id: &str) -> KeyLock {
        self.get_lock(&format!("group:{}", group_id))
    }

    /// Run `fut` while holding the lock for `key`
    pub async fn with_lock<F, T>(&self, key: &str, fut: F) -> T
    where
        F: Future<Output = T>,
    {
        let lock = self.get_lock(key);
        let _guard = lock.lock().await;
        fut.await
    }

    /// Keys currently held in the registry
    pub fn keys(&self) -> Vec<String> {
        self.locks.keys()
    }

    /// Number of registered locks
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    /// Drop idle locks now, regardless of the sweep schedule
    pub fn cleanup(&self) -> usize {
        self.locks.sweep()
    }
}

impl Default for LockManager {
    fn default() -> Self {
        Self::new(LockManagerConfig::default())
    }
}
