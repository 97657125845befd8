//! # Fastdial Client
//!
//! Resilient, resolution-aware connection dialer. A hostname is resolved
//! through a cache in front of a DNS resolver with an OS fallback, the
//! candidates are filtered by an allow/deny policy, and each surviving
//! address is tried in order until one connects.
//!
//! ## Features
//!
//! - **Resolution cache** with pluggable eviction and hosts-file seeding
//! - **In-flight coalescing** so concurrent cold lookups hit DNS once
//! - **IP/CIDR policy** evaluated per candidate at dial time
//! - **Plain or TLS** connections via rustls, certificate trust configurable
//! - **Dial history** remembering the address each host was last reached on
//!
//! ## Usage
//!
//! ```no_run
//! use fastdial_client::{Dialer, DialerConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> fastdial_client::Result<()> {
//! let dialer = Dialer::new(DialerConfig::default()).await?;
//! let conn = dialer
//!     .dial(&CancellationToken::new(), "tcp", "example.com:80")
//!     .await?;
//! println!("connected to {:?}", conn.peer_addr());
//! println!("last address: {:?}", dialer.last_dialed_address("example.com"));
//! dialer.close();
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod cache;
pub mod config;
pub mod connect;
pub mod dialer;
pub mod dns;
pub mod error;
pub mod policy;
pub mod resolver;
pub mod telemetry;
pub mod tls;

// Prelude with canonical types
pub mod prelude;

pub use crate::prelude::*;
