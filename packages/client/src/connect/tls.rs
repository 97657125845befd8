//! TLS handshake over an established TCP stream

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use rustls::ClientConfig;
use rustls::pki_types::ServerName;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;
use tokio_util::sync::CancellationToken;

use super::attempt::AttemptError;
use crate::error::{self, Result};
use crate::resolver::parse_literal;

/// Server name presented in SNI and checked against the certificate.
///
/// DNS names are used as given; IP literals (bracketed or not) become an
/// IP address server name. The connected IP is used when the hostname is
/// neither.
pub fn server_name(hostname: &str, connected: IpAddr) -> Result<ServerName<'static>> {
    if let Some(ip) = parse_literal(hostname) {
        return Ok(ServerName::from(ip));
    }
    match ServerName::try_from(hostname.to_string()) {
        Ok(name) => Ok(name),
        Err(e) if hostname.is_empty() => Err(error::invalid_address(e)),
        Err(_) => Ok(ServerName::from(connected)),
    }
}

/// Run the client handshake, aborting when `cancel` fires or `timeout`
/// elapses.
pub async fn handshake(
    stream: TcpStream,
    server_name: ServerName<'static>,
    config: Arc<ClientConfig>,
    timeout: Duration,
    cancel: &CancellationToken,
) -> std::result::Result<TlsStream<TcpStream>, AttemptError> {
    let connector = TlsConnector::from(config);
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(AttemptError::Canceled),
        result = tokio::time::timeout(timeout, connector.connect(server_name, stream)) => match result {
            Ok(Ok(tls)) => Ok(tls),
            Ok(Err(e)) => Err(AttemptError::Handshake(e)),
            Err(_) => Err(AttemptError::TimedOut(timeout)),
        },
    }
}
