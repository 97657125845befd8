//! Candidate iteration for plain and TLS dials

use std::net::{IpAddr, SocketAddr};

use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use super::core::Dialer;
use crate::connect::{self, AttemptError, Connection, Network, split_host_port};
use crate::dns::AddressRecord;
use crate::error::{self, Result};
use crate::telemetry::DialStats;

impl Dialer {
    /// Open a plain TCP connection to `address` (`host:port`).
    ///
    /// Candidates are tried in record order, A before AAAA; addresses the
    /// policy rejects are skipped without a connection attempt. The address
    /// that succeeds is remembered as the host's last dialed address.
    ///
    /// # Errors
    ///
    /// - `InvalidAddress` for a malformed address or unknown network
    /// - `ResolutionFailed` / `CacheIoFailed` from resolution
    /// - `NoAddressFound` when no candidate is left or every attempt failed
    /// - `Canceled` when `cancel` fires first
    /// - `CacheIoFailed` when the winning address cannot be recorded; the
    ///   connection is dropped
    pub async fn dial(&self, cancel: &CancellationToken, network: &str, address: &str) -> Result<Connection> {
        self.dial_counted(cancel, network, address, false).await
    }

    /// Like [`Dialer::dial`] but completes a TLS handshake on each candidate.
    ///
    /// Certificates are checked according to the configured `TlsTrust`.
    ///
    /// # Errors
    ///
    /// Same as [`Dialer::dial`]. A failed handshake, or one that outlasts the
    /// connect timeout, counts as a failed attempt.
    pub async fn dial_tls(&self, cancel: &CancellationToken, network: &str, address: &str) -> Result<Connection> {
        self.dial_counted(cancel, network, address, true).await
    }

    async fn dial_counted(
        &self,
        cancel: &CancellationToken,
        network: &str,
        address: &str,
        use_tls: bool,
    ) -> Result<Connection> {
        let result = self.dial_inner(cancel, network, address, use_tls).await;
        let stats = &self.inner.stats;
        match &result {
            Ok(_) => DialStats::bump(&stats.dial_successes),
            Err(e) => {
                DialStats::bump(&stats.dial_failures);
                debug!("Dial {} {} failed: {}", network, address, e);
            }
        }
        result
    }

    async fn dial_inner(
        &self,
        cancel: &CancellationToken,
        network: &str,
        address: &str,
        use_tls: bool,
    ) -> Result<Connection> {
        let network: Network = network.parse()?;
        let target = split_host_port(address)?;
        let hostname = target.hostname;

        let record = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(error::canceled(hostname)),
            record = self.record_for(hostname) => record?,
        };
        if record.is_empty() {
            return Err(error::no_address_found(hostname));
        }

        for ip in record.candidates() {
            if !self.inner.policy.allowed(ip) {
                DialStats::bump(&self.inner.stats.policy_rejections);
                trace!("Policy rejected {} for {}", ip, hostname);
                continue;
            }

            DialStats::bump(&self.inner.stats.dial_attempts);
            match self.attempt(cancel, network, hostname, ip, target.port, use_tls).await {
                Ok(conn) => {
                    // Drop the connection if the winner can't be recorded.
                    self.inner.history.record(hostname, ip)?;
                    debug!("Connected to {} via {}", hostname, ip);
                    return Ok(conn);
                }
                Err(e) if e.is_canceled() => return Err(error::canceled(hostname)),
                Err(e) => debug!("Dial to {} via {} failed: {}", hostname, ip, e),
            }
        }

        Err(error::no_address_found(hostname))
    }

    /// Direct cache read first, full resolution on any cache failure.
    async fn record_for(&self, hostname: &str) -> Result<AddressRecord> {
        match self.inner.resolver.cached_resolution(hostname) {
            Ok(record) => {
                DialStats::bump(&self.inner.stats.cache_hits);
                Ok(record)
            }
            Err(_) => self.inner.resolver.resolve(hostname).await,
        }
    }

    async fn attempt(
        &self,
        cancel: &CancellationToken,
        network: Network,
        hostname: &str,
        ip: IpAddr,
        port: u16,
        use_tls: bool,
    ) -> std::result::Result<Connection, AttemptError> {
        if !network.admits(ip) {
            return Err(AttemptError::Family { ip, network });
        }

        let config = &self.inner.config;
        let stream = connect::connect_tcp(SocketAddr::new(ip, port), &config.timeouts, cancel).await?;
        if !use_tls {
            return Ok(Connection::Tcp(stream));
        }

        let server_name = connect::tls::server_name(hostname, ip)
            .map_err(|e| AttemptError::Handshake(std::io::Error::other(e)))?;
        let tls = connect::tls::handshake(
            stream,
            server_name,
            self.inner.tls.clone(),
            config.timeouts.connect,
            cancel,
        )
        .await?;
        Ok(Connection::Tls(Box::new(tls)))
    }
}
