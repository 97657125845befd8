//! Allow/deny address policy
//!
//! Built once from IP and CIDR lists and evaluated per dial candidate. Deny
//! entries always win; a non-empty allow list admits only its members.

use std::net::IpAddr;

use ipnet::IpNet;

use crate::error::{self, Result};

/// Allow/deny entry that is neither an IP nor a CIDR
#[derive(Debug, thiserror::Error)]
#[error("invalid policy entry '{entry}': expected an IP address or CIDR")]
pub struct InvalidEntry {
    pub entry: String,
}

/// Set of IP networks matched by linear scan.
#[derive(Debug, Clone, Default)]
pub struct CidrMatcher {
    nets: Vec<IpNet>,
}

impl CidrMatcher {
    /// Parse a list of IPs and CIDRs. Bare IPs become host networks.
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> std::result::Result<Self, InvalidEntry> {
        let mut nets = Vec::with_capacity(entries.len());
        for entry in entries {
            let entry = entry.as_ref().trim();
            let net = entry
                .parse::<IpNet>()
                .or_else(|_| entry.parse::<IpAddr>().map(IpNet::from))
                .map_err(|_| InvalidEntry {
                    entry: entry.to_string(),
                })?;
            nets.push(net);
        }
        nets.sort();
        nets.dedup();
        Ok(Self { nets })
    }

    pub fn contains(&self, ip: IpAddr) -> bool {
        self.nets.iter().any(|net| net.contains(&ip))
    }

    pub fn is_empty(&self) -> bool {
        self.nets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nets.len()
    }
}

/// Immutable allow/deny predicate over candidate addresses.
#[derive(Debug, Clone, Default)]
pub struct NetworkPolicy {
    allow: CidrMatcher,
    deny: CidrMatcher,
}

impl NetworkPolicy {
    /// Build a policy from allow and deny lists.
    ///
    /// # Errors
    ///
    /// Returns a `PolicyConstructionFailed` error naming the first entry that
    /// is neither an IP address nor a CIDR.
    pub fn new<A: AsRef<str>, D: AsRef<str>>(allow: &[A], deny: &[D]) -> Result<Self> {
        let allow = CidrMatcher::parse(allow).map_err(error::policy)?;
        let deny = CidrMatcher::parse(deny).map_err(error::policy)?;
        Ok(Self { allow, deny })
    }

    /// Policy that admits every address.
    pub fn allow_all() -> Self {
        Self::default()
    }

    /// True when `ip` may be dialed.
    pub fn allowed(&self, ip: IpAddr) -> bool {
        if self.deny.contains(ip) {
            return false;
        }
        self.allow.is_empty() || self.allow.contains(ip)
    }
}
