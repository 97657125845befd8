//! Resolution cache: hostname → serialized `AddressRecord`

use std::sync::Arc;

use tracing::debug;

use super::store::KvStore;
use crate::dns::AddressRecord;
use crate::error::{self, Result};

/// Durable hostname → record mapping.
///
/// Entries are never refreshed here; a hostname is re-resolved only when it
/// is absent from the backing store.
#[derive(Clone)]
pub struct ResolutionCache {
    store: Arc<dyn KvStore>,
}

impl ResolutionCache {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Cached record for `hostname`.
    ///
    /// A miss is a `NotCached` ("no data found") error; undecodable bytes are
    /// a `CacheIoFailed` error.
    pub fn get(&self, hostname: &str) -> Result<AddressRecord> {
        let bytes = self
            .store
            .get(hostname)
            .ok_or_else(|| error::not_cached(hostname))?;
        AddressRecord::from_bytes(&bytes).map_err(|e| e.with_host(hostname))
    }

    /// Serialize and store `record` under `hostname`.
    pub fn put(&self, hostname: &str, record: &AddressRecord) -> Result<()> {
        let bytes = record.to_bytes()?;
        self.store
            .set(hostname, bytes)
            .map_err(|e| e.with_host(hostname))
    }

    /// Pre-seed records, skipping any that fail to store.
    ///
    /// Returns how many were stored.
    pub fn seed<'a, I>(&self, records: I) -> usize
    where
        I: IntoIterator<Item = &'a AddressRecord>,
    {
        let mut stored = 0;
        for record in records {
            match self.put(&record.host, record) {
                Ok(()) => stored += 1,
                Err(e) => debug!("Skipping seed entry for {}: {}", record.host, e),
            }
        }
        stored
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Forget every cached record.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Drop records the backing store's eviction policy considers stale.
    pub fn sweep(&self) -> usize {
        self.store.sweep()
    }

    pub fn close(&self) {
        self.store.close();
    }
}
