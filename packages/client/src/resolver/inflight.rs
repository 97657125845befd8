//! Per-hostname coordination of cold resolutions
//!
//! Concurrent callers resolving the same uncached name queue on one async
//! mutex, so only the first reaches the resolver; the rest find the cache
//! filled when they get the lock.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Default)]
struct Slot {
    lock: Arc<Mutex<()>>,
    // Callers holding or waiting for `lock`.
    users: AtomicUsize,
}

#[derive(Debug, Default)]
pub struct InFlight {
    locks: DashMap<String, Arc<Slot>>,
}

impl InFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive resolution rights on `hostname`.
    ///
    /// Dropping the returned future while it waits releases its claim on
    /// the hostname entry, so abandoned waiters leave nothing behind.
    pub async fn acquire(&self, hostname: &str) -> InFlightGuard<'_> {
        let slot = {
            let entry = self.locks.entry(hostname.to_string()).or_default();
            entry.users.fetch_add(1, Ordering::AcqRel);
            Arc::clone(entry.value())
        };

        let mut guard = InFlightGuard {
            locks: &self.locks,
            hostname: hostname.to_string(),
            slot: Arc::clone(&slot),
            held: None,
        };
        guard.held = Some(Arc::clone(&slot.lock).lock_owned().await);
        guard
    }

    /// Number of hostnames with a resolution in progress or queued.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

/// Releases the hostname lock on drop and forgets it once nobody waits.
pub struct InFlightGuard<'a> {
    locks: &'a DashMap<String, Arc<Slot>>,
    hostname: String,
    slot: Arc<Slot>,
    held: Option<OwnedMutexGuard<()>>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        drop(self.held.take());
        self.slot.users.fetch_sub(1, Ordering::AcqRel);
        // Registration happens under the shard lock, so a zero count seen
        // here cannot race a new caller.
        self.locks
            .remove_if(&self.hostname, |_, slot| slot.users.load(Ordering::Acquire) == 0);
    }
}
