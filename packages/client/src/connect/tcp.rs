//! TCP connection establishment with timeout, keep-alive and cancellation

use std::net::SocketAddr;
use std::time::Duration;

use socket2::{SockRef, TcpKeepalive};
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::attempt::AttemptError;
use crate::config::TimeoutConfig;

/// Connect to `addr`, aborting when `cancel` fires or the connect timeout
/// elapses.
pub async fn connect_tcp(
    addr: SocketAddr,
    timeouts: &TimeoutConfig,
    cancel: &CancellationToken,
) -> Result<TcpStream, AttemptError> {
    let stream = tokio::select! {
        biased;
        () = cancel.cancelled() => return Err(AttemptError::Canceled),
        result = tokio::time::timeout(timeouts.connect, TcpStream::connect(addr)) => match result {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => return Err(AttemptError::Io(e)),
            Err(_) => return Err(AttemptError::TimedOut(timeouts.connect)),
        },
    };

    configure_tcp_socket(&stream, timeouts.keepalive);
    Ok(stream)
}

/// Enable `TCP_NODELAY` and keep-alive. Failures are logged, not fatal.
fn configure_tcp_socket(stream: &TcpStream, keepalive: Option<Duration>) {
    if let Err(e) = stream.set_nodelay(true) {
        debug!("Failed to set TCP_NODELAY: {}", e);
    }

    if let Some(idle) = keepalive {
        let params = TcpKeepalive::new().with_time(idle);
        if let Err(e) = SockRef::from(stream).set_tcp_keepalive(&params) {
            debug!("Failed to set TCP keepalive: {}", e);
        }
    }
}
