//! Resolver service seam
//!
//! The dialer never speaks DNS itself. It asks a `ResolverService` for a
//! record through a primary channel and, when enabled, a fallback channel.

use std::future::Future;
use std::pin::Pin;

use super::record::AddressRecord;

/// Boxed future returned by resolver services.
pub type ResolveFuture<'a> =
    Pin<Box<dyn Future<Output = Result<AddressRecord, ResolverError>> + Send + 'a>>;

/// Hostname resolution with a primary and a fallback channel.
pub trait ResolverService: Send + Sync + 'static {
    /// Resolve through the configured resolver list.
    fn resolve_primary<'a>(&'a self, hostname: &'a str) -> ResolveFuture<'a>;

    /// Resolve through the secondary channel (the operating system resolver
    /// for the default implementation).
    fn resolve_fallback<'a>(&'a self, hostname: &'a str) -> ResolveFuture<'a>;
}

/// DNS resolution errors reported by a `ResolverService`
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    #[error("DNS resolution timeout")]
    Timeout,
    #[error("DNS query returned empty result set")]
    EmptyResult,
    #[error("DNS lookup failed: {0}")]
    LookupFailed(String),
    #[error("no resolvers configured")]
    NoResolvers,
    #[error("resolution channel not supported: {0}")]
    Unsupported(&'static str),
}

impl ResolverError {
    /// Create a new LookupFailed error
    pub fn lookup_failed(msg: impl Into<String>) -> Self {
        Self::LookupFailed(msg.into())
    }
}
