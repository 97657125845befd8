//! Dialer configuration types

pub mod dialer;
pub mod timeouts;

pub use dialer::{DEFAULT_MAX_RETRIES, DEFAULT_RESOLVERS, DialerConfig};
pub use timeouts::TimeoutConfig;

/// How server certificates are checked on TLS dials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsTrust {
    /// Verify the chain against web PKI and native roots
    #[default]
    Verify,
    /// Accept any certificate. Only for scanning or testing endpoints whose
    /// identity does not matter.
    Insecure,
}
