//! Caching for resolved records and dial history
//!
//! Both caches sit on a byte-oriented `KvStore`; the default backend is an
//! in-memory `DashMap` with a pluggable eviction policy.

pub mod eviction;
pub mod history;
pub mod resolution;
pub mod store;

pub use eviction::{EvictionPolicy, MaxAge, MaxEntries, Unbounded};
pub use history::DialHistory;
pub use resolution::ResolutionCache;
pub use store::{KvStore, MemoryStore, StoreError};
