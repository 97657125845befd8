//! Per-candidate connection failures
//!
//! These never reach callers directly: the dialer logs them and moves to the
//! next candidate, except for cancellation which ends the dial.

use std::net::IpAddr;
use std::time::Duration;

use thiserror::Error;

use super::network::Network;

#[derive(Debug, Error)]
pub enum AttemptError {
    #[error("operation canceled")]
    Canceled,
    #[error("connect timed out after {0:?}")]
    TimedOut(Duration),
    #[error("connect failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("tls handshake failed: {0}")]
    Handshake(std::io::Error),
    #[error("address {ip} is not reachable over {network}")]
    Family { ip: IpAddr, network: Network },
}

impl AttemptError {
    pub fn is_canceled(&self) -> bool {
        matches!(self, AttemptError::Canceled)
    }
}
