use std::error::Error as StdError;
use std::fmt;

/// A `Result` alias where the `Err` case is `fastdial_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents errors that can occur while resolving or dialing a host.
pub struct Error {
    pub inner: Box<Inner>,
}

pub struct Inner {
    pub kind: Kind,
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub host: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Neither the cache nor the resolver produced a usable record
    ResolutionFailed,
    /// No candidate address survived policy filtering and dialing
    NoAddressFound,
    /// Record serialization or key-value store I/O failed
    CacheIoFailed,
    /// Allow or deny list could not be parsed
    PolicyConstructionFailed,
    /// Hostname has no entry in the resolution cache
    NotCached,
    /// Malformed `host:port` or unsupported network name
    InvalidAddress,
    /// TLS client configuration or server name error
    Tls,
    /// The caller's cancellation token fired
    Canceled,
    /// Invalid dialer configuration
    Builder,
}

impl Error {
    pub fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner {
                kind,
                source: None,
                host: None,
            }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub fn with<E: Into<Box<dyn StdError + Send + Sync>>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.inner.host = Some(host.into());
        self
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.inner.kind
    }

    /// Get the hostname associated with this error, if any
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.inner.host.as_deref()
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("fastdial_client::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        if let Some(ref host) = self.inner.host {
            f.field("host", host);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.kind {
            Kind::ResolutionFailed => f.write_str("could not resolve host")?,
            Kind::NoAddressFound => f.write_str("no address found for host")?,
            Kind::CacheIoFailed => f.write_str("cache i/o error")?,
            Kind::PolicyConstructionFailed => f.write_str("invalid network policy")?,
            Kind::NotCached => f.write_str("no data found")?,
            Kind::InvalidAddress => f.write_str("invalid address")?,
            Kind::Tls => f.write_str("tls error")?,
            Kind::Canceled => f.write_str("operation canceled")?,
            Kind::Builder => f.write_str("dialer configuration error")?,
        }

        if let Some(ref host) = self.inner.host {
            write!(f, " ({host})")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
