//! Dialer configuration
//!
//! Defaults mirror a typical scanner-friendly setup: public resolvers behind
//! the system ones, hosts-file overrides on, OS resolver fallback on.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rustls::pki_types::CertificateDer;

use super::timeouts::TimeoutConfig;
use super::TlsTrust;
use crate::cache::{EvictionPolicy, Unbounded};

/// Public resolvers queried after any system resolvers.
pub const DEFAULT_RESOLVERS: [&str; 4] = ["1.1.1.1:53", "1.0.0.1:53", "8.8.8.8:53", "8.8.4.4:53"];

/// Default attempts per DNS query.
pub const DEFAULT_MAX_RETRIES: usize = 5;

/// Configuration recognised by `Dialer::new`
#[derive(Debug, Clone)]
pub struct DialerConfig {
    /// Resolver endpoints queried after the system list
    pub base_resolvers: Vec<SocketAddr>,
    /// Prepend nameservers read from the system resolver file
    pub resolvers_file: bool,
    /// Override for the resolver file location
    pub resolv_conf_path: Option<PathBuf>,
    /// Attempts per DNS query across the resolver list
    pub max_retries: usize,
    /// Fall back to the operating system resolver when the primary fails
    pub enable_fallback: bool,
    /// Pre-seed the resolution cache from the hosts file
    pub hosts_file: bool,
    /// Override for the hosts file location
    pub hosts_path: Option<PathBuf>,
    /// Static hostname → address overrides seeded after the hosts file
    pub overrides: HashMap<String, Vec<IpAddr>>,
    /// IPs/CIDRs that may be dialed; empty admits everything not denied
    pub allow: Vec<String>,
    /// IPs/CIDRs that must never be dialed
    pub deny: Vec<String>,
    /// Certificate trust mode for TLS dials
    pub tls: TlsTrust,
    /// Additional trust anchors for `TlsTrust::Verify`
    pub root_certificates: Vec<CertificateDer<'static>>,
    pub timeouts: TimeoutConfig,
    /// Eviction policy for the resolution cache store
    pub eviction: Arc<dyn EvictionPolicy>,
}

impl Default for DialerConfig {
    fn default() -> Self {
        Self {
            base_resolvers: DEFAULT_RESOLVERS
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect(),
            resolvers_file: true,
            resolv_conf_path: None,
            max_retries: DEFAULT_MAX_RETRIES,
            enable_fallback: true,
            hosts_file: true,
            hosts_path: None,
            overrides: HashMap::new(),
            allow: Vec::new(),
            deny: Vec::new(),
            tls: TlsTrust::default(),
            root_certificates: Vec::new(),
            timeouts: TimeoutConfig::default(),
            eviction: Arc::new(Unbounded),
        }
    }
}

impl DialerConfig {
    /// Configuration that touches no system files: explicit resolvers only,
    /// no hosts file.
    #[must_use]
    pub fn isolated(resolvers: Vec<SocketAddr>) -> Self {
        Self {
            base_resolvers: resolvers,
            resolvers_file: false,
            hosts_file: false,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_resolvers(mut self, resolvers: Vec<SocketAddr>) -> Self {
        self.base_resolvers = resolvers;
        self
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.enable_fallback = enabled;
        self
    }

    #[must_use]
    pub fn with_hosts_file(mut self, enabled: bool) -> Self {
        self.hosts_file = enabled;
        self
    }

    #[must_use]
    pub fn with_override(mut self, hostname: impl Into<String>, ips: Vec<IpAddr>) -> Self {
        self.overrides.insert(hostname.into(), ips);
        self
    }

    #[must_use]
    pub fn with_allow<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow.extend(entries.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_deny<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deny.extend(entries.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_tls_trust(mut self, trust: TlsTrust) -> Self {
        self.tls = trust;
        self
    }

    #[must_use]
    pub fn with_root_certificate(mut self, cert: CertificateDer<'static>) -> Self {
        self.root_certificates.push(cert);
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.connect = timeout;
        self
    }

    #[must_use]
    pub fn with_eviction(mut self, eviction: Arc<dyn EvictionPolicy>) -> Self {
        self.eviction = eviction;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if no resolver source is configured or a timeout is
    /// invalid. Allow/deny entries are checked when the policy is built.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_resolvers.is_empty() && !self.resolvers_file {
            return Err("at least one resolver or the system resolver file is required".to_string());
        }
        self.timeouts.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = DialerConfig::default();
        assert_eq!(config.base_resolvers.len(), 4);
        assert_eq!(config.max_retries, 5);
        assert!(config.enable_fallback);
        assert!(config.hosts_file);
        assert!(config.resolvers_file);
        assert_eq!(config.tls, TlsTrust::Verify);
        assert_eq!(config.timeouts.connect, Duration::from_secs(10));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn no_resolver_source_is_rejected() {
        let config = DialerConfig::isolated(Vec::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_connect_timeout_is_rejected() {
        let config = DialerConfig::default().with_connect_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
