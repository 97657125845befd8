//! Dial and resolution timeouts

use std::time::Duration;

/// Timeouts applied by the dialer. Cancellation through the caller's token
/// is always honoured in addition to these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    /// Per-candidate TCP connect timeout
    pub connect: Duration,
    /// TCP keep-alive idle time set on established sockets
    pub keepalive: Option<Duration>,
    /// Per-query timeout handed to the DNS resolver
    pub dns: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            keepalive: Some(Duration::from_secs(10)),
            dns: Duration::from_secs(5),
        }
    }
}

impl TimeoutConfig {
    /// Validate timeout values
    ///
    /// # Errors
    ///
    /// Returns an error if the connect or DNS timeout is zero, or if a
    /// keep-alive interval is set to zero.
    pub fn validate(&self) -> Result<(), String> {
        if self.connect.is_zero() {
            return Err("connect timeout must be greater than 0".to_string());
        }
        if self.dns.is_zero() {
            return Err("dns timeout must be greater than 0".to_string());
        }
        if self.keepalive.is_some_and(|k| k.is_zero()) {
            return Err("keepalive interval must be greater than 0".to_string());
        }
        Ok(())
    }
}
