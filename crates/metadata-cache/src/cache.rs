//! Bounded in-memory cache with insertion-order eviction

use crate::types::{CacheEntry, CacheStats};
use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// A bounded, time-expiring cache
///
/// Holds at most `capacity` entries. An entry older than `ttl` is treated as
/// absent. When full, the oldest-inserted entry is evicted to make room.
pub struct MetadataCache<K, V> {
    state: Mutex<CacheState<K, V>>,
    capacity: usize,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

struct CacheState<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    /// Keys in insertion order, oldest at the front
    order: VecDeque<K>,
}

impl<K, V> CacheState<K, V>
where
    K: Eq + Hash + Clone,
{
    fn remove(&mut self, key: &K) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.order.retain(|k| k != key);
        Some(entry)
    }

    /// Drop expired entries. Insertion order is age order, so they form a prefix.
    fn prune_expired(&mut self, ttl: Duration, now: Instant) -> usize {
        let mut pruned = 0;
        while let Some(key) = self.order.front() {
            let expired = self
                .entries
                .get(key)
                .map_or(true, |entry| entry.is_expired(ttl, now));
            if !expired {
                break;
            }
            if let Some(key) = self.order.pop_front() {
                self.entries.remove(&key);
                pruned += 1;
            }
        }
        pruned
    }

    fn evict_oldest(&mut self) -> Option<K> {
        let key = self.order.pop_front()?;
        self.entries.remove(&key);
        Some(key)
    }
}

impl<K, V> MetadataCache<K, V>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    /// Create a new cache. Capacity is clamped to at least one entry.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            state: Mutex::new(CacheState {
                entries: HashMap::with_capacity(capacity),
                order: VecDeque::with_capacity(capacity),
            }),
            capacity,
            ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Get a value if present and not expired. Does not refresh the entry.
    pub async fn get(&self, key: &K) -> Option<V> {
        let mut state = self.state.lock().await;

        let (expired, value) = match state.entries.get(key) {
            Some(entry) if entry.is_expired(self.ttl, Instant::now()) => (true, None),
            Some(entry) => (false, Some(entry.value.clone())),
            None => (false, None),
        };

        if expired {
            state.remove(key);
            debug!(key = ?key, ttl_secs = self.ttl.as_secs(), "Cache entry expired");
        }
        drop(state);

        match value {
            Some(value) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(value)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Insert a value, evicting the oldest entry if the cache is full
    ///
    /// Re-inserting an existing key replaces its value and restarts its age.
    pub async fn insert(&self, key: K, value: V) {
        let mut state = self.state.lock().await;

        let pruned = state.prune_expired(self.ttl, Instant::now());
        if pruned > 0 {
            debug!(pruned, "Pruned expired cache entries");
        }

        if state.remove(&key).is_none() && state.entries.len() >= self.capacity {
            if let Some(evicted) = state.evict_oldest() {
                debug!(key = ?evicted, "Evicted oldest cache entry");
            }
        }

        state.order.push_back(key.clone());
        state.entries.insert(key, CacheEntry::new(value));
    }

    /// Remove every entry
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        let cleared = state.entries.len();
        state.entries.clear();
        state.order.clear();
        debug!(cleared, "Cache cleared");
    }

    /// Number of stored entries, including any not yet pruned after expiry
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Get current cache statistics
    pub async fn stats(&self) -> CacheStats {
        let entries = self.len().await;
        CacheStats {
            entries,
            capacity: self.capacity,
            ttl_secs: self.ttl.as_secs(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
