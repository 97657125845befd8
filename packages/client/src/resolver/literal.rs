//! IP literal fast path
//!
//! Literal hosts never reach the cache or the resolver service.

use std::net::{IpAddr, Ipv6Addr};

use crate::dns::AddressRecord;

/// Parse `hostname` as a bare IPv4/IPv6 literal or a bracketed IPv6 literal
/// (`[::1]`, RFC 2732 style).
pub fn parse_literal(hostname: &str) -> Option<IpAddr> {
    if let Some(inner) = hostname
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        return inner.parse::<Ipv6Addr>().ok().map(IpAddr::V6);
    }
    hostname.parse().ok()
}

/// Single-address record for a literal host, `None` for names.
pub fn literal_record(hostname: &str) -> Option<AddressRecord> {
    parse_literal(hostname).map(|ip| AddressRecord::from_ip(hostname, ip))
}
