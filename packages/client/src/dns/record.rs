//! Resolved address record
//!
//! Immutable value holding the IPv4 and IPv6 addresses resolved for a
//! hostname. Records are stored in the resolution cache as JSON.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use serde::{Deserialize, Serialize};

use crate::error::{self, Result};

/// Addresses resolved for a single hostname, in resolver order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    /// Hostname the record was resolved for
    #[serde(default)]
    pub host: String,
    /// IPv4 addresses (A records)
    #[serde(default)]
    pub a: Vec<Ipv4Addr>,
    /// IPv6 addresses (AAAA records)
    #[serde(default)]
    pub aaaa: Vec<Ipv6Addr>,
    /// Time-to-live reported by the resolver, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

impl AddressRecord {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Single-address record for an IP literal.
    pub fn from_ip(host: impl Into<String>, ip: IpAddr) -> Self {
        let mut record = Self::new(host);
        record.push(ip);
        record
    }

    /// Build a record from a mixed address list, splitting by family and
    /// keeping the relative order within each family.
    pub fn from_ips<I>(host: impl Into<String>, ips: I) -> Self
    where
        I: IntoIterator<Item = IpAddr>,
    {
        let mut record = Self::new(host);
        for ip in ips {
            record.push(ip);
        }
        record
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn push(&mut self, ip: IpAddr) {
        match ip {
            IpAddr::V4(v4) => self.a.push(v4),
            IpAddr::V6(v6) => self.aaaa.push(v6),
        }
    }

    /// True when the record has no address of either family.
    pub fn is_empty(&self) -> bool {
        self.a.is_empty() && self.aaaa.is_empty()
    }

    pub fn len(&self) -> usize {
        self.a.len() + self.aaaa.len()
    }

    /// Dial candidates: every A address followed by every AAAA address.
    pub fn candidates(&self) -> impl Iterator<Item = IpAddr> + '_ {
        self.a
            .iter()
            .copied()
            .map(IpAddr::V4)
            .chain(self.aaaa.iter().copied().map(IpAddr::V6))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(error::cache_io)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(error::cache_io)
    }
}
