//! Hosts file loading
//!
//! Parses `/etc/hosts`-format files into address records used to pre-seed
//! the resolution cache.

use std::collections::HashMap;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use super::record::AddressRecord;

/// Platform location of the hosts file.
pub fn default_hosts_path() -> PathBuf {
    if cfg!(windows) {
        let root = std::env::var("SystemRoot").unwrap_or_else(|_| "C:\\Windows".to_string());
        PathBuf::from(root).join("System32\\drivers\\etc\\hosts")
    } else {
        PathBuf::from("/etc/hosts")
    }
}

/// Read and parse a hosts file.
pub async fn load_hosts_file(path: &Path) -> std::io::Result<Vec<AddressRecord>> {
    let contents = tokio::fs::read_to_string(path).await?;
    Ok(parse_hosts(&contents))
}

/// Parse hosts file contents.
///
/// Lines are `ip name [alias...]`; anything after `#` is ignored. A name
/// listed on several lines collects every address, in file order.
pub fn parse_hosts(contents: &str) -> Vec<AddressRecord> {
    let mut order: Vec<String> = Vec::new();
    let mut records: HashMap<String, AddressRecord> = HashMap::new();

    for line in contents.lines() {
        let line = line.split('#').next().unwrap_or_default();
        let mut fields = line.split_whitespace();

        let Some(ip) = fields.next().and_then(parse_host_ip) else {
            continue;
        };

        for name in fields {
            let record = records.entry(name.to_string()).or_insert_with(|| {
                order.push(name.to_string());
                AddressRecord::new(name)
            });
            if !record.candidates().any(|existing| existing == ip) {
                record.push(ip);
            }
        }
    }

    order
        .into_iter()
        .filter_map(|name| records.remove(&name))
        .collect()
}

// Scoped addresses such as `fe80::1%lo0` keep only the address part.
fn parse_host_ip(field: &str) -> Option<IpAddr> {
    let addr = field.split('%').next().unwrap_or(field);
    addr.parse().ok()
}
