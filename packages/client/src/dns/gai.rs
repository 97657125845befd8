//! Operating system resolver (`getaddrinfo`) used as the fallback channel

use tokio::net::lookup_host;
use tracing::debug;

use super::record::AddressRecord;
use super::service::ResolverError;

/// Resolve `hostname` with the system resolver.
///
/// The port is irrelevant for name resolution and is discarded.
pub async fn lookup_system(hostname: &str) -> Result<AddressRecord, ResolverError> {
    let addrs = lookup_host((hostname, 0))
        .await
        .map_err(|e| ResolverError::lookup_failed(format!("system resolver: {e}")))?;

    let mut record = AddressRecord::new(hostname);
    for addr in addrs {
        let ip = addr.ip();
        if !record.candidates().any(|existing| existing == ip) {
            record.push(ip);
        }
    }

    if record.is_empty() {
        return Err(ResolverError::EmptyResult);
    }

    debug!("system resolver returned {} addresses for {}", record.len(), hostname);
    Ok(record)
}
