//! TLS trust and connection timeouts

use std::time::Duration;

use fastdial_client::TlsTrust;
use fastdial_client::CertificateDer;

use crate::builder::core::DialerBuilder;

impl DialerBuilder {
    /// Accept any server certificate on TLS dials.
    #[must_use]
    pub fn insecure_tls(mut self) -> Self {
        self.config.tls = TlsTrust::Insecure;
        self
    }

    #[must_use]
    pub fn tls_trust(mut self, trust: TlsTrust) -> Self {
        self.config.tls = trust;
        self
    }

    /// Trust `cert` in addition to the web PKI and platform roots.
    #[must_use]
    pub fn root_certificate(mut self, cert: CertificateDer<'static>) -> Self {
        self.config.root_certificates.push(cert);
        self
    }

    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeouts.connect = timeout;
        self
    }

    /// TCP keep-alive idle time; `None` leaves the OS default.
    #[must_use]
    pub fn keepalive(mut self, idle: Option<Duration>) -> Self {
        self.config.timeouts.keepalive = idle;
        self
    }

    /// Per-query DNS timeout.
    #[must_use]
    pub fn dns_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeouts.dns = timeout;
        self
    }
}
