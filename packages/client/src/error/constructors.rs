use super::types::{Error, Kind};

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Creates an `Error` for a failed resolution of `host`.
pub fn resolution_failed(host: &str) -> Error {
    Error::new(Kind::ResolutionFailed).with_host(host)
}

/// Creates an `Error` for a failed resolution of `host` with its cause.
pub fn resolution<E: Into<BoxError>>(host: &str, e: E) -> Error {
    Error::new(Kind::ResolutionFailed).with_host(host).with(e.into())
}

/// Creates an `Error` when no candidate address could be dialed.
pub fn no_address_found(host: &str) -> Error {
    Error::new(Kind::NoAddressFound).with_host(host)
}

/// Creates an `Error` for a serialization or store failure.
pub fn cache_io<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::CacheIoFailed).with(e.into())
}

/// Creates an `Error` for an allow or deny entry that does not parse.
pub fn policy<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::PolicyConstructionFailed).with(e.into())
}

/// Creates the "no data found" `Error` for a cache miss on `host`.
pub fn not_cached(host: &str) -> Error {
    Error::new(Kind::NotCached).with_host(host)
}

/// Creates an `Error` for a malformed address or network name.
pub fn invalid_address<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::InvalidAddress).with(e.into())
}

/// Creates an `Error` for a TLS configuration failure.
pub fn tls<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Tls).with(e.into())
}

/// Creates an `Error` for a cancelled dial.
pub fn canceled(host: &str) -> Error {
    Error::new(Kind::Canceled).with_host(host)
}

/// Creates an `Error` for an invalid configuration.
pub fn builder<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Builder).with(e.into())
}
