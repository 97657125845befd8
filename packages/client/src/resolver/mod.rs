//! Resolution orchestration
//!
//! Literal fast path, cache-first lookup, resolver service with optional
//! fallback, and per-hostname coalescing of cold lookups.

pub mod core;
pub mod inflight;
pub mod literal;

pub use self::core::CachingResolver;
pub use literal::{literal_record, parse_literal};
