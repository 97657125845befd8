//! `host:port` splitting

use crate::error::{self, Result};

/// Target of a dial: hostname as supplied plus the port suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialTarget<'a> {
    /// Everything before the last colon (`example.com`, `[::1]`, `10.0.0.1`)
    pub hostname: &'a str,
    pub port: u16,
}

/// Split `address` on its last colon.
///
/// Bracketed IPv6 literals work because the closing bracket precedes the
/// port separator.
///
/// # Errors
///
/// Returns an `InvalidAddress` error when there is no colon, the host part
/// is empty, or the port is not a number in `0..=65535`.
pub fn split_host_port(address: &str) -> Result<DialTarget<'_>> {
    let separator = address
        .rfind(':')
        .ok_or_else(|| error::invalid_address(format!("missing port in address: {address}")))?;

    let hostname = &address[..separator];
    if hostname.is_empty() {
        return Err(error::invalid_address(format!("missing host in address: {address}")));
    }

    let port = address[separator + 1..]
        .parse::<u16>()
        .map_err(|_| error::invalid_address(format!("invalid port in address: {address}")))?;

    Ok(DialTarget { hostname, port })
}
