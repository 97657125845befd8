//! DNS resolution via the [hickory-resolver](https://github.com/hickory-dns/hickory-dns) crate

use std::fmt;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

use hickory_resolver::config::{LookupIpStrategy, NameServerConfig, ResolverConfig, ResolverOpts};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::xfer::Protocol;
use hickory_resolver::{Resolver, TokioResolver};
use tracing::debug;

use super::gai;
use super::record::AddressRecord;
use super::service::{ResolveFuture, ResolverError, ResolverService};

/// Default resolver service: hickory against an explicit resolver list, with
/// the operating system resolver as the fallback channel.
pub struct HickoryResolverService {
    resolver: TokioResolver,
    servers: Vec<SocketAddr>,
    deadline: Duration,
}

impl HickoryResolverService {
    /// Build a resolver that queries `servers` in order over UDP then TCP.
    ///
    /// `attempts` is the number of retries per query across the list.
    pub fn new(
        servers: &[SocketAddr],
        attempts: usize,
        timeout: Duration,
    ) -> Result<Self, ResolverError> {
        if servers.is_empty() {
            return Err(ResolverError::NoResolvers);
        }

        let mut config = ResolverConfig::new();
        for addr in servers {
            config.add_name_server(NameServerConfig::new(*addr, Protocol::Udp));
            config.add_name_server(NameServerConfig::new(*addr, Protocol::Tcp));
        }

        let mut opts = ResolverOpts::default();
        opts.ip_strategy = LookupIpStrategy::Ipv4AndIpv6;
        opts.attempts = attempts.max(1);
        opts.timeout = timeout;

        let resolver = Resolver::builder_with_config(config, TokioConnectionProvider::default())
            .with_options(opts)
            .build();

        Ok(Self {
            resolver,
            servers: servers.to_vec(),
            deadline: timeout.saturating_mul(u32::try_from(attempts.max(1)).unwrap_or(u32::MAX)),
        })
    }

    /// Bound on a whole lookup on either channel. Defaults to the per-query
    /// timeout times the attempt count.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Resolver endpoints in query order.
    pub fn servers(&self) -> &[SocketAddr] {
        &self.servers
    }

    async fn lookup(&self, hostname: &str) -> Result<AddressRecord, ResolverError> {
        let lookup = tokio::time::timeout(self.deadline, self.resolver.lookup_ip(hostname))
            .await
            .map_err(|_| ResolverError::Timeout)?
            .map_err(|e| ResolverError::lookup_failed(e.to_string()))?;

        let ttl = lookup
            .valid_until()
            .saturating_duration_since(Instant::now())
            .as_secs();
        let record = AddressRecord::from_ips(hostname, lookup.iter())
            .with_ttl(u32::try_from(ttl).unwrap_or(u32::MAX));

        if record.is_empty() {
            return Err(ResolverError::EmptyResult);
        }

        debug!("hickory resolved {} to {} addresses", hostname, record.len());
        Ok(record)
    }

    async fn lookup_system(&self, hostname: &str) -> Result<AddressRecord, ResolverError> {
        tokio::time::timeout(self.deadline, gai::lookup_system(hostname))
            .await
            .map_err(|_| ResolverError::Timeout)?
    }
}

impl fmt::Debug for HickoryResolverService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HickoryResolverService")
            .field("servers", &self.servers)
            .field("deadline", &self.deadline)
            .finish()
    }
}

impl ResolverService for HickoryResolverService {
    fn resolve_primary<'a>(&'a self, hostname: &'a str) -> ResolveFuture<'a> {
        Box::pin(self.lookup(hostname))
    }

    fn resolve_fallback<'a>(&'a self, hostname: &'a str) -> ResolveFuture<'a> {
        Box::pin(self.lookup_system(hostname))
    }
}
