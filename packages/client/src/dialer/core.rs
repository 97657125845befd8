//! `Dialer` handle, construction and accessors

use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;

use rustls::ClientConfig;
use tracing::debug;

use super::setup;
use crate::cache::{DialHistory, KvStore, MemoryStore, ResolutionCache};
use crate::config::DialerConfig;
use crate::dns::{AddressRecord, HickoryResolverService, ResolverService};
use crate::error::{self, Result};
use crate::policy::NetworkPolicy;
use crate::resolver::CachingResolver;
use crate::telemetry::{DialStats, DialStatsSnapshot};
use crate::tls;

/// Resolution-aware connection dialer.
///
/// Cloning is cheap; clones share caches, policy and statistics.
#[derive(Clone)]
pub struct Dialer {
    pub(super) inner: Arc<Inner>,
}

pub(super) struct Inner {
    pub(super) config: DialerConfig,
    pub(super) resolver: CachingResolver,
    pub(super) history: DialHistory,
    pub(super) policy: NetworkPolicy,
    pub(super) tls: Arc<ClientConfig>,
    pub(super) stats: Arc<DialStats>,
}

impl Dialer {
    /// Build a dialer with the default resolver service and in-memory stores.
    ///
    /// System resolver and hosts files are read best-effort; an unreadable
    /// file is logged and skipped.
    ///
    /// # Errors
    ///
    /// - `Builder` when the configuration is invalid or no resolver endpoint
    ///   remains
    /// - `PolicyConstructionFailed` for a malformed allow/deny entry
    /// - `Tls` when the TLS client configuration cannot be built
    pub async fn new(config: DialerConfig) -> Result<Self> {
        config.validate().map_err(error::builder)?;

        let servers = setup::resolver_endpoints(&config).await;
        let service = HickoryResolverService::new(&servers, config.max_retries, config.timeouts.dns)
            .map_err(error::builder)?;
        debug!("Dialer using {} resolver endpoints", service.servers().len());

        let resolution_store = Arc::new(MemoryStore::with_eviction(config.eviction.clone()));
        let history_store = Arc::new(MemoryStore::new());
        let dialer = Self::with_parts(config, Arc::new(service), resolution_store, history_store)?;

        let seeded = setup::seed_overrides(&dialer.inner.config, dialer.inner.resolver.cache()).await;
        if seeded > 0 {
            debug!("Pre-seeded {} host overrides", seeded);
        }
        Ok(dialer)
    }

    /// Build a dialer from caller-supplied collaborators.
    ///
    /// Nothing is read from disk: resolver endpoints, the hosts file and
    /// overrides in `config` are ignored.
    ///
    /// # Errors
    ///
    /// - `PolicyConstructionFailed` for a malformed allow/deny entry
    /// - `Tls` when the TLS client configuration cannot be built
    pub fn with_parts(
        config: DialerConfig,
        service: Arc<dyn ResolverService>,
        resolution_store: Arc<dyn KvStore>,
        history_store: Arc<dyn KvStore>,
    ) -> Result<Self> {
        let policy = NetworkPolicy::new(config.allow.as_slice(), config.deny.as_slice())?;
        let tls = tls::client_config(config.tls, &config.root_certificates)?;
        let stats = Arc::new(DialStats::default());
        let resolver = CachingResolver::new(
            service,
            ResolutionCache::new(resolution_store),
            config.enable_fallback,
            stats.clone(),
        );

        Ok(Self {
            inner: Arc::new(Inner {
                config,
                resolver,
                history: DialHistory::new(history_store),
                policy,
                tls,
                stats,
            }),
        })
    }

    /// Resolve `hostname` through the cache, then the resolver service.
    ///
    /// # Errors
    ///
    /// See [`CachingResolver::resolve`].
    pub async fn resolve(&self, hostname: &str) -> Result<AddressRecord> {
        self.inner.resolver.resolve(hostname).await
    }

    /// Cached record for `hostname` without triggering resolution.
    ///
    /// # Errors
    ///
    /// `NotCached` ("no data found") on a miss, `CacheIoFailed` when the
    /// stored entry cannot be decoded.
    pub fn cached_resolution(&self, hostname: &str) -> Result<AddressRecord> {
        self.inner.resolver.cached_resolution(hostname)
    }

    /// Address of the most recent successful dial to `hostname`.
    pub fn last_dialed_address(&self, hostname: &str) -> Option<IpAddr> {
        self.inner.history.last(hostname)
    }

    /// Forget every cached resolution; the next lookup of any hostname goes
    /// to the resolver service. Host overrides are not re-seeded.
    pub fn clear_resolution_cache(&self) {
        self.inner.resolver.cache().clear();
        debug!("Resolution cache cleared");
    }

    /// Drop cached resolutions that have expired under the configured
    /// eviction policy. Returns how many were removed.
    pub fn sweep_resolution_cache(&self) -> usize {
        self.inner.resolver.cache().sweep()
    }

    pub fn stats(&self) -> DialStatsSnapshot {
        self.inner.stats.snapshot()
    }

    pub fn config(&self) -> &DialerConfig {
        &self.inner.config
    }

    /// Release both stores. Afterwards every dial fails with `CacheIoFailed`:
    /// hostnames cannot be cached and winners cannot be recorded.
    pub fn close(&self) {
        self.inner.resolver.cache().close();
        self.inner.history.close();
        debug!("Dialer closed");
    }
}

impl fmt::Debug for Dialer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dialer")
            .field("resolver", &self.inner.resolver)
            .field("policy", &self.inner.policy)
            .field("tls", &self.inner.config.tls)
            .finish_non_exhaustive()
    }
}
