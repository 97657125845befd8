//! Pluggable eviction policies for the in-memory store
//!
//! The resolution cache itself never expires entries. A policy attached to
//! the backing `MemoryStore` decides when stored values go stale and how
//! large the store may grow.

use std::fmt;
use std::time::{Duration, Instant};

/// Decides when a stored value is stale and bounds the store size.
pub trait EvictionPolicy: fmt::Debug + Send + Sync + 'static {
    /// True when a value stored at `stored_at` must no longer be served.
    fn is_expired(&self, stored_at: Instant, now: Instant) -> bool;

    /// Maximum number of entries, if bounded.
    fn capacity(&self) -> Option<usize> {
        None
    }
}

/// Keep everything until the store is cleared or closed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unbounded;

impl EvictionPolicy for Unbounded {
    fn is_expired(&self, _stored_at: Instant, _now: Instant) -> bool {
        false
    }
}

/// Drop values older than a fixed age.
#[derive(Debug, Clone, Copy)]
pub struct MaxAge(pub Duration);

impl EvictionPolicy for MaxAge {
    fn is_expired(&self, stored_at: Instant, now: Instant) -> bool {
        now.saturating_duration_since(stored_at) >= self.0
    }
}

/// Bound the store to a number of entries; the oldest tenth is dropped when
/// an insert would exceed it.
#[derive(Debug, Clone, Copy)]
pub struct MaxEntries(pub usize);

impl EvictionPolicy for MaxEntries {
    fn is_expired(&self, _stored_at: Instant, _now: Instant) -> bool {
        false
    }

    fn capacity(&self) -> Option<usize> {
        Some(self.0)
    }
}
