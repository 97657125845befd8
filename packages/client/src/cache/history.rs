//! Dial history: hostname → IP of the most recent successful connection

use std::net::IpAddr;
use std::sync::Arc;

use super::store::KvStore;
use crate::error::Result;

/// Records which address each hostname was last reached on.
///
/// Every successful dial overwrites the previous entry.
#[derive(Clone)]
pub struct DialHistory {
    store: Arc<dyn KvStore>,
}

impl DialHistory {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub fn record(&self, hostname: &str, ip: IpAddr) -> Result<()> {
        self.store
            .set(hostname, ip.to_string().into_bytes())
            .map_err(|e| e.with_host(hostname))
    }

    /// Last dialed address for `hostname`; `None` when absent or unreadable.
    pub fn last(&self, hostname: &str) -> Option<IpAddr> {
        let bytes = self.store.get(hostname)?;
        std::str::from_utf8(&bytes).ok()?.parse().ok()
    }

    pub fn close(&self) {
        self.store.close();
    }
}
