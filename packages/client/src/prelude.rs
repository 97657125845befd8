//! Fastdial Prelude
//!
//! The types callers need to build a dialer and use its connections.

pub use crate::dialer::Dialer;
pub use crate::config::{DialerConfig, TimeoutConfig, TlsTrust};
pub use crate::connect::{Connection, Network};
pub use crate::dns::{AddressRecord, ResolveFuture, ResolverError, ResolverService};
pub use crate::cache::{EvictionPolicy, KvStore, MaxAge, MaxEntries, MemoryStore, Unbounded};
pub use crate::error::{Error, Kind, Result};
pub use crate::policy::NetworkPolicy;
pub use crate::telemetry::DialStatsSnapshot;

// Cancellation context accepted by every dial
pub use tokio_util::sync::CancellationToken;

// Extra trust anchors for verified TLS dials
pub use rustls::pki_types::CertificateDer;
