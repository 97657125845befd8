//! Caching resolver: literal fast path, cache, resolver service, fallback

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use super::inflight::InFlight;
use super::literal::literal_record;
use crate::cache::ResolutionCache;
use crate::dns::{AddressRecord, ResolverError, ResolverService};
use crate::error::{self, Result};
use crate::telemetry::DialStats;

/// Resolves hostnames through the resolution cache, falling back to the
/// resolver service on a miss and persisting fresh results.
pub struct CachingResolver {
    service: Arc<dyn ResolverService>,
    cache: ResolutionCache,
    inflight: InFlight,
    enable_fallback: bool,
    stats: Arc<DialStats>,
}

impl CachingResolver {
    pub fn new(
        service: Arc<dyn ResolverService>,
        cache: ResolutionCache,
        enable_fallback: bool,
        stats: Arc<DialStats>,
    ) -> Self {
        Self {
            service,
            cache,
            inflight: InFlight::new(),
            enable_fallback,
            stats,
        }
    }

    /// Resolve `hostname` to an address record.
    ///
    /// IP literals are answered directly. Otherwise a cached record is
    /// returned as-is (no TTL is applied); on a miss the resolver service is
    /// queried and the result stored before returning.
    ///
    /// # Errors
    ///
    /// - `ResolutionFailed` when the primary (and, if enabled, the fallback)
    ///   channel fails or yields no address
    /// - `CacheIoFailed` when a cached entry cannot be decoded or a fresh
    ///   record cannot be stored
    pub async fn resolve(&self, hostname: &str) -> Result<AddressRecord> {
        if let Some(record) = literal_record(hostname) {
            debug!("IP address fast path for {}", hostname);
            return Ok(record);
        }

        if let Some(record) = self.cached(hostname)? {
            return Ok(record);
        }

        let _guard = self.inflight.acquire(hostname).await;

        // Another caller may have filled the cache while we queued.
        if let Some(record) = self.cached(hostname)? {
            return Ok(record);
        }

        DialStats::bump(&self.stats.cache_misses);
        let record = self.resolve_fresh(hostname).await?;
        self.cache.put(hostname, &record)?;
        debug!("Cached {} addresses for {}", record.len(), hostname);
        Ok(record)
    }

    /// Cached record only; never queries the resolver service.
    pub fn cached_resolution(&self, hostname: &str) -> Result<AddressRecord> {
        self.cache.get(hostname)
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    fn cached(&self, hostname: &str) -> Result<Option<AddressRecord>> {
        match self.cache.get(hostname) {
            Ok(record) => {
                DialStats::bump(&self.stats.cache_hits);
                debug!("DNS cache hit for {}", hostname);
                Ok(Some(record))
            }
            Err(e) if e.is_not_cached() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn resolve_fresh(&self, hostname: &str) -> Result<AddressRecord> {
        DialStats::bump(&self.stats.resolver_calls);
        let primary = self
            .service
            .resolve_primary(hostname)
            .await
            .and_then(usable);

        let outcome = match primary {
            Ok(record) => Ok(record),
            Err(err) if self.enable_fallback => {
                warn!("Primary resolution failed for {}: {}, trying fallback", hostname, err);
                DialStats::bump(&self.stats.fallback_calls);
                self.service
                    .resolve_fallback(hostname)
                    .await
                    .and_then(usable)
            }
            Err(err) => Err(err),
        };

        outcome
            .map(|mut record| {
                if record.host.is_empty() {
                    record.host = hostname.to_string();
                }
                record
            })
            .map_err(|err| error::resolution(hostname, err))
    }
}

impl fmt::Debug for CachingResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachingResolver")
            .field("enable_fallback", &self.enable_fallback)
            .field("cached", &self.cache.len())
            .field("inflight", &self.inflight.len())
            .finish()
    }
}

fn usable(record: AddressRecord) -> std::result::Result<AddressRecord, ResolverError> {
    if record.is_empty() {
        Err(ResolverError::EmptyResult)
    } else {
        Ok(record)
    }
}
