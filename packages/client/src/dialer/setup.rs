//! Best-effort loading of system resolvers and host overrides

use std::net::SocketAddr;

use tracing::{debug, warn};

use crate::cache::ResolutionCache;
use crate::config::DialerConfig;
use crate::dns::{AddressRecord, hosts, system};

/// System nameservers (when enabled) followed by the configured list,
/// without duplicates.
pub(super) async fn resolver_endpoints(config: &DialerConfig) -> Vec<SocketAddr> {
    let mut servers = Vec::with_capacity(config.base_resolvers.len() + 2);

    if config.resolvers_file {
        let path = config
            .resolv_conf_path
            .clone()
            .unwrap_or_else(system::default_resolv_conf_path);
        match system::load_resolver_file(&path).await {
            Ok(found) => {
                debug!("Loaded {} nameservers from {}", found.len(), path.display());
                push_unique(&mut servers, found);
            }
            Err(e) => warn!("Could not read resolvers from {}: {}", path.display(), e),
        }
    }

    push_unique(&mut servers, config.base_resolvers.iter().copied());
    servers
}

fn push_unique(servers: &mut Vec<SocketAddr>, found: impl IntoIterator<Item = SocketAddr>) {
    for addr in found {
        if !servers.contains(&addr) {
            servers.push(addr);
        }
    }
}

/// Seed the hosts file (when enabled) and then the explicit overrides.
///
/// Returns the number of hostnames stored.
pub(super) async fn seed_overrides(config: &DialerConfig, cache: &ResolutionCache) -> usize {
    let mut seeded = 0;

    if config.hosts_file {
        let path = config
            .hosts_path
            .clone()
            .unwrap_or_else(hosts::default_hosts_path);
        match hosts::load_hosts_file(&path).await {
            Ok(records) => seeded += cache.seed(&records),
            Err(e) => warn!("Could not read hosts file {}: {}", path.display(), e),
        }
    }

    let overrides: Vec<AddressRecord> = config
        .overrides
        .iter()
        .filter(|(_, ips)| !ips.is_empty())
        .map(|(host, ips)| AddressRecord::from_ips(host.as_str(), ips.iter().copied()))
        .collect();
    seeded += cache.seed(&overrides);

    seeded
}
