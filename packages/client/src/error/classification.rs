use super::types::{Error, Kind};

impl Error {
    /// Returns true if the host could not be resolved.
    #[must_use]
    pub fn is_resolution(&self) -> bool {
        matches!(self.inner.kind, Kind::ResolutionFailed)
    }

    /// Returns true if every candidate address was filtered out or failed.
    #[must_use]
    pub fn is_no_address(&self) -> bool {
        matches!(self.inner.kind, Kind::NoAddressFound)
    }

    /// Returns true if a cache or history store operation failed.
    #[must_use]
    pub fn is_cache_io(&self) -> bool {
        matches!(self.inner.kind, Kind::CacheIoFailed)
    }

    /// Returns true if the allow/deny configuration was rejected.
    #[must_use]
    pub fn is_policy(&self) -> bool {
        matches!(self.inner.kind, Kind::PolicyConstructionFailed)
    }

    /// Returns true if the hostname had no cached record.
    #[must_use]
    pub fn is_not_cached(&self) -> bool {
        matches!(self.inner.kind, Kind::NotCached)
    }

    /// Returns true if the error came from a cancelled dial.
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        matches!(self.inner.kind, Kind::Canceled)
    }

    /// Returns true if the address or network argument was malformed.
    #[must_use]
    pub fn is_invalid_address(&self) -> bool {
        matches!(self.inner.kind, Kind::InvalidAddress)
    }

    /// Returns true if the error is related to TLS setup.
    #[must_use]
    pub fn is_tls(&self) -> bool {
        matches!(self.inner.kind, Kind::Tls)
    }

    /// Returns true if the error is from the configuration.
    #[must_use]
    pub fn is_builder(&self) -> bool {
        matches!(self.inner.kind, Kind::Builder)
    }
}
