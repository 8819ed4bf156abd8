//! Registry implementation

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Registry tuning
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Entries unused for longer than this are removed by a sweep
    pub idle_ttl: Duration,
    /// Minimum time between two sweeps
    pub sweep_interval: Duration,
    /// Capacity that triggers bulk eviction of the oldest quarter
    pub max_entries: usize,
}

impl RegistryConfig {
    /// Registry that only ever shrinks through idle sweeps
    pub fn unbounded(idle_ttl: Duration, sweep_interval: Duration) -> Self {
        Self {
            idle_ttl,
            sweep_interval,
            max_entries: usize::MAX,
        }
    }
}

struct RegistryEntry<V> {
    value: Arc<V>,
    last_used: Instant,
}

struct RegistryState<V> {
    entries: HashMap<String, RegistryEntry<V>>,
    last_sweep: Instant,
}

/// Keyed registry of shared values with last-used tracking
///
/// Values are handed out as `Arc` clones while the registry lock is held, so
/// an entry whose strong count is 1 has no handle outside the registry.
/// Neither the idle sweep nor the bulk eviction ever removes an entry that is
/// still referenced elsewhere.
pub struct ExpiringRegistry<V> {
    name: &'static str,
    config: RegistryConfig,
    state: Mutex<RegistryState<V>>,
}

impl<V> ExpiringRegistry<V> {
    /// Create a new registry; `name` only appears in log lines
    pub fn new(name: &'static str, config: RegistryConfig) -> Self {
        Self {
            name,
            config,
            state: Mutex::new(RegistryState {
                entries: HashMap::new(),
                last_sweep: Instant::now(),
            }),
        }
    }

    /// Get the registry configuration
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Return the value for `key`, creating it with `create` if absent
    ///
    /// Runs a due sweep first and evicts the oldest quarter when a new key
    /// would exceed capacity. The entry's last-used time is refreshed.
    pub fn get_or_create<F>(&self, key: &str, create: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        let now = Instant::now();
        let mut state = self.state.lock();

        if now.duration_since(state.last_sweep) > self.config.sweep_interval {
            self.sweep_locked(&mut state, now);
        }

        if let Some(entry) = state.entries.get_mut(key) {
            entry.last_used = now;
            return entry.value.clone();
        }

        if state.entries.len() >= self.config.max_entries {
            self.evict_oldest_locked(&mut state);
        }

        let value = Arc::new(create());
        state.entries.insert(
            key.to_string(),
            RegistryEntry {
                value: value.clone(),
                last_used: now,
            },
        );
        value
    }

    /// Return the value for `key` if present, refreshing its last-used time
    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        let now = Instant::now();
        let mut state = self.state.lock();
        state.entries.get_mut(key).map(|entry| {
            entry.last_used = now;
            entry.value.clone()
        })
    }

    /// Refresh the last-used time of `key`; returns false if absent
    pub fn touch(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut state = self.state.lock();
        match state.entries.get_mut(key) {
            Some(entry) => {
                entry.last_used = now;
                true
            }
            None => false,
        }
    }

    /// Sweep idle entries if the sweep interval has elapsed
    pub fn sweep_if_due(&self) -> usize {
        let now = Instant::now();
        let mut state = self.state.lock();
        if now.duration_since(state.last_sweep) > self.config.sweep_interval {
            self.sweep_locked(&mut state, now)
        } else {
            0
        }
    }

    /// Remove every unreferenced entry idle for longer than `idle_ttl`
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut state = self.state.lock();
        self.sweep_locked(&mut state, now)
    }

    /// Evict the oldest quarter of the registry by last-used time
    pub fn evict_oldest(&self) -> usize {
        let mut state = self.state.lock();
        self.evict_oldest_locked(&mut state)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, key: &str) -> bool {
        self.state.lock().entries.contains_key(key)
    }

    /// Snapshot of the current key set
    pub fn keys(&self) -> Vec<String> {
        self.state.lock().entries.keys().cloned().collect()
    }

    fn sweep_locked(&self, state: &mut RegistryState<V>, now: Instant) -> usize {
        state.last_sweep = now;
        let idle_ttl = self.config.idle_ttl;
        let before = state.entries.len();

        state.entries.retain(|_, entry| {
            now.duration_since(entry.last_used) <= idle_ttl || Arc::strong_count(&entry.value) > 1
        });

        let removed = before - state.entries.len();
        if removed > 0 {
            debug!(
                "{} registry swept {} idle entries, {} remain",
                self.name,
                removed,
                state.entries.len()
            );
        }
        removed
    }

    fn evict_oldest_locked(&self, state: &mut RegistryState<V>) -> usize {
        let target = (state.entries.len() / 4).max(1);

        let mut candidates: Vec<(Instant, String)> = state
            .entries
            .iter()
            .filter(|(_, entry)| Arc::strong_count(&entry.value) == 1)
            .map(|(key, entry)| (entry.last_used, key.clone()))
            .collect();
        candidates.sort_by(|a, b| a.0.cmp(&b.0));

        let mut evicted = 0;
        for (_, key) in candidates.into_iter().take(target) {
            state.entries.remove(&key);
            evicted += 1;
        }

        if evicted < target {
            warn!(
                "{} registry at capacity with {} entries in use; evicted {} of {}",
                self.name,
                state.entries.len(),
                evicted,
                target
            );
        } else {
            info!(
                "{} registry evicted {} least recently used entries",
                self.name, evicted
            );
        }
        evicted
    }
}
