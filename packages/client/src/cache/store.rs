//! Key-value store used for the resolution cache and the dial history
//!
//! `MemoryStore` is the default backend: a sharded `DashMap` with a
//! pluggable eviction policy.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use dashmap::DashMap;
use tracing::debug;

use super::eviction::{EvictionPolicy, Unbounded};
use crate::error::{self, Result};

/// Store-level failures
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store is closed")]
    Closed,
    #[error("store write failed: {0}")]
    Write(String),
}

/// Byte-oriented key-value store safe for concurrent use.
///
/// Races between writers are last-writer-wins.
pub trait KvStore: Send + Sync + 'static {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Remove `key`, returning whether it was present.
    fn remove(&self, key: &str) -> bool;

    /// Number of stored entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every entry.
    fn clear(&self);

    /// Drop entries that have gone stale, returning how many were removed.
    /// Stores without expiry keep everything.
    fn sweep(&self) -> usize {
        0
    }

    /// Release the store. Later reads miss and later writes fail.
    fn close(&self);
}

#[derive(Debug)]
struct StoredValue {
    bytes: Vec<u8>,
    stored_at: Instant,
}

/// In-memory `KvStore` backed by `DashMap`
#[derive(Debug)]
pub struct MemoryStore {
    entries: DashMap<String, StoredValue>,
    eviction: Arc<dyn EvictionPolicy>,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_eviction(Arc::new(Unbounded))
    }

    pub fn with_eviction(eviction: Arc<dyn EvictionPolicy>) -> Self {
        Self {
            entries: DashMap::new(),
            eviction,
            closed: AtomicBool::new(false),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    // Removes the oldest tenth of the entries (at least one).
    fn evict_entries(&self) {
        let mut candidates: Vec<(String, Instant)> = self
            .entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().stored_at))
            .collect();
        candidates.sort_by_key(|(_, stored_at)| *stored_at);

        let target = (candidates.len() / 10).max(1);
        for (key, _) in candidates.into_iter().take(target) {
            self.entries.remove(&key);
        }

        debug!("Evicted old entries, store size: {}", self.entries.len());
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        if self.is_closed() {
            return None;
        }

        let now = Instant::now();
        {
            let entry = self.entries.get(key)?;
            if !self.eviction.is_expired(entry.stored_at, now) {
                return Some(entry.bytes.clone());
            }
        }

        // The read guard must be gone before touching the same shard again.
        self.entries
            .remove_if(key, |_, value| self.eviction.is_expired(value.stored_at, now));
        debug!("Removed expired entry for {}", key);
        None
    }

    fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        if self.is_closed() {
            return Err(error::cache_io(StoreError::Closed));
        }

        if let Some(capacity) = self.eviction.capacity() {
            if capacity == 0 {
                return Ok(());
            }
            if self.entries.len() >= capacity && !self.entries.contains_key(key) {
                self.evict_entries();
            }
        }

        self.entries.insert(
            key.to_string(),
            StoredValue {
                bytes: value,
                stored_at: Instant::now(),
            },
        );
        Ok(())
    }

    fn remove(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&self) {
        self.entries.clear();
    }

    fn sweep(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries
            .retain(|_, value| !self.eviction.is_expired(value.stored_at, now));
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!("Swept {} expired entries, store size: {}", removed, self.entries.len());
        }
        removed
    }

    fn close(&self) {
        self.closed.store(true, Ordering::Release);
        self.entries.clear();
    }
}
