//! System resolver list loading (`resolv.conf`)

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

/// Standard DNS port appended to nameservers listed without one.
pub const DNS_PORT: u16 = 53;

/// Platform location of the resolver configuration file.
pub fn default_resolv_conf_path() -> PathBuf {
    PathBuf::from("/etc/resolv.conf")
}

/// Read the `nameserver` entries of a resolver configuration file.
pub async fn load_resolver_file(path: &Path) -> std::io::Result<Vec<SocketAddr>> {
    let contents = tokio::fs::read_to_string(path).await?;
    Ok(parse_resolv_conf(&contents))
}

/// Extract `nameserver` addresses, in file order, as `ip:53` endpoints.
pub fn parse_resolv_conf(contents: &str) -> Vec<SocketAddr> {
    contents
        .lines()
        .map(|line| line.split(['#', ';']).next().unwrap_or_default())
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            match fields.next() {
                Some("nameserver") => fields.next(),
                _ => None,
            }
        })
        .filter_map(|server| {
            let addr = server.split('%').next().unwrap_or(server);
            addr.parse::<IpAddr>().ok()
        })
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
        .collect()
}
