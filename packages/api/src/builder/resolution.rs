//! Resolver, hosts-file and cache settings

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use fastdial_client::EvictionPolicy;

use crate::builder::core::DialerBuilder;

impl DialerBuilder {
    /// Resolver endpoints queried after the system list.
    #[must_use]
    pub fn resolvers<I>(mut self, resolvers: I) -> Self
    where
        I: IntoIterator<Item = SocketAddr>,
    {
        self.config.base_resolvers = resolvers.into_iter().collect();
        self
    }

    /// Read nameservers from the system resolver file (on by default).
    #[must_use]
    pub fn system_resolvers(mut self, enabled: bool) -> Self {
        self.config.resolvers_file = enabled;
        self
    }

    /// Read system nameservers from `path` instead of the platform default.
    #[must_use]
    pub fn resolv_conf(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.resolvers_file = true;
        self.config.resolv_conf_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Use the operating system resolver when the primary fails.
    #[must_use]
    pub fn fallback(mut self, enabled: bool) -> Self {
        self.config.enable_fallback = enabled;
        self
    }

    /// Pre-seed the cache from the hosts file (on by default).
    #[must_use]
    pub fn hosts_file(mut self, enabled: bool) -> Self {
        self.config.hosts_file = enabled;
        self
    }

    /// Pre-seed the cache from the hosts file at `path`.
    #[must_use]
    pub fn hosts_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.hosts_file = true;
        self.config.hosts_path = Some(path.into());
        self
    }

    /// Pin `hostname` to `ips`.
    #[must_use]
    pub fn host_override(mut self, hostname: impl Into<String>, ips: impl IntoIterator<Item = IpAddr>) -> Self {
        self.config.overrides.insert(hostname.into(), ips.into_iter().collect());
        self
    }

    /// Eviction policy for cached resolutions.
    #[must_use]
    pub fn eviction(mut self, policy: impl EvictionPolicy) -> Self {
        self.config.eviction = Arc::new(policy);
        self
    }
}
