//! Lock-free dialer statistics with cache-padded atomic counters

use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_utils::CachePadded;

/// Counters updated by the resolve and dial paths.
///
/// Each counter is cache-padded so concurrent dials do not contend on one
/// cache line.
#[derive(Debug, Default)]
pub struct DialStats {
    pub cache_hits: CachePadded<AtomicU64>,
    pub cache_misses: CachePadded<AtomicU64>,
    /// Primary resolver invocations
    pub resolver_calls: CachePadded<AtomicU64>,
    /// Fallback resolver invocations
    pub fallback_calls: CachePadded<AtomicU64>,
    /// Candidates skipped by the address policy
    pub policy_rejections: CachePadded<AtomicU64>,
    /// Individual connect (or connect + handshake) attempts
    pub dial_attempts: CachePadded<AtomicU64>,
    /// Dial calls that returned a connection
    pub dial_successes: CachePadded<AtomicU64>,
    /// Dial calls that returned an error
    pub dial_failures: CachePadded<AtomicU64>,
}

impl DialStats {
    #[inline]
    pub(crate) fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter.
    pub fn snapshot(&self) -> DialStatsSnapshot {
        DialStatsSnapshot {
            cache_hits: self.cache_hits.load(Ordering::Acquire),
            cache_misses: self.cache_misses.load(Ordering::Acquire),
            resolver_calls: self.resolver_calls.load(Ordering::Acquire),
            fallback_calls: self.fallback_calls.load(Ordering::Acquire),
            policy_rejections: self.policy_rejections.load(Ordering::Acquire),
            dial_attempts: self.dial_attempts.load(Ordering::Acquire),
            dial_successes: self.dial_successes.load(Ordering::Acquire),
            dial_failures: self.dial_failures.load(Ordering::Acquire),
        }
    }
}

/// Immutable view of `DialStats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DialStatsSnapshot {
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub resolver_calls: u64,
    pub fallback_calls: u64,
    pub policy_rejections: u64,
    pub dial_attempts: u64,
    pub dial_successes: u64,
    pub dial_failures: u64,
}

impl DialStatsSnapshot {
    /// Cache hit rate as percentage
    pub fn cache_hit_rate(&self) -> f64 {
        let total = self.cache_hits + self.cache_misses;
        if total == 0 {
            0.0
        } else {
            (self.cache_hits as f64 / total as f64) * 100.0
        }
    }

    /// Dial success rate as percentage
    pub fn success_rate(&self) -> f64 {
        let total = self.dial_successes + self.dial_failures;
        if total == 0 {
            0.0
        } else {
            (self.dial_successes as f64 / total as f64) * 100.0
        }
    }

    /// Check if the dialer has done any work
    pub fn has_activity(&self) -> bool {
        self.dial_successes + self.dial_failures + self.cache_hits + self.cache_misses > 0
    }
}
