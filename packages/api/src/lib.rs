//! Fastdial Public API
//!
//! Fluent construction of a resilient, resolution-aware connection dialer.
//!
//! ```no_run
//! use fastdial::{CancellationToken, Fastdial};
//!
//! # async fn run() -> fastdial::Result<()> {
//! let dialer = Fastdial::builder()
//!     .deny(["127.0.0.0/8", "::1"])
//!     .fallback(true)
//!     .build()
//!     .await?;
//! let conn = dialer.dial_tls(&CancellationToken::new(), "tcp", "example.com:443").await?;
//! assert!(conn.is_tls());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;

pub use builder::DialerBuilder;

// Re-export important types from client package
pub use fastdial_client::prelude::*;

/// Main entry point providing static builder methods
pub struct Fastdial;

impl Fastdial {
    /// Builder with the default configuration.
    #[must_use]
    pub fn builder() -> DialerBuilder {
        DialerBuilder::new()
    }

    /// Builder that reads no system files and queries only `resolvers`.
    #[must_use]
    pub fn isolated(resolvers: Vec<std::net::SocketAddr>) -> DialerBuilder {
        DialerBuilder::from_config(DialerConfig::isolated(resolvers))
    }

    /// Dialer with the default configuration.
    ///
    /// # Errors
    ///
    /// See [`DialerBuilder::build`].
    pub async fn dialer() -> Result<Dialer> {
        DialerBuilder::new().build().await
    }
}
