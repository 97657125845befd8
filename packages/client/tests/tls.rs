//! TLS dials against a local self-signed server

mod common;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use common::{Answer, ScriptedResolver, dialer, test_config};
use fastdial_client::{CancellationToken, TlsTrust};
use rustls::ServerConfig;
use rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_rustls::TlsAcceptor;

const GREETING: &[u8] = b"hello over tls";

/// Self-signed `localhost` server that greets each client. Returns its
/// address and certificate.
async fn tls_server() -> (SocketAddr, CertificateDer<'static>) {
    let key = rcgen::generate_simple_self_signed(vec!["localhost".to_string()])
        .expect("self-signed certificate");
    let cert = key.cert.der().clone();
    let private = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key.signing_key.serialize_der()));

    let config = ServerConfig::builder_with_provider(Arc::new(rustls::crypto::ring::default_provider()))
        .with_safe_default_protocol_versions()
        .expect("protocol versions")
        .with_no_client_auth()
        .with_single_cert(vec![cert.clone()], private)
        .expect("server certificate");
    let acceptor = TlsAcceptor::from(Arc::new(config));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local listener");
    let addr = listener.local_addr().expect("listener address");

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                if let Ok(mut tls) = acceptor.accept(stream).await {
                    let _ = tls.write_all(GREETING).await;
                    let _ = tls.shutdown().await;
                }
            });
        }
    });

    (addr, cert)
}

/// Listener on `127.0.0.2:port` that accepts TCP and never answers.
async fn silent_listener(port: u16) {
    let listener = tokio::net::TcpListener::bind(("127.0.0.2", port))
        .await
        .expect("bind silent listener");
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            held.push(stream);
        }
    });
}

fn localhost_resolver() -> Arc<ScriptedResolver> {
    Arc::new(ScriptedResolver::new().primary("localhost", Answer::Record(vec!["127.0.0.1"])))
}

#[tokio::test]
async fn insecure_mode_accepts_self_signed_certificate() {
    let (addr, _) = tls_server().await;
    let dialer = dialer(test_config().with_tls_trust(TlsTrust::Insecure), localhost_resolver());

    let mut conn = dialer
        .dial_tls(&CancellationToken::new(), "tcp", &format!("localhost:{}", addr.port()))
        .await
        .expect("insecure tls dial");
    assert!(conn.is_tls());

    let mut received = Vec::new();
    conn.read_to_end(&mut received).await.expect("read greeting");
    assert_eq!(received, GREETING);
}

#[tokio::test]
async fn verify_mode_rejects_unknown_issuer() {
    let (addr, _) = tls_server().await;
    let dialer = dialer(test_config(), localhost_resolver());

    let err = dialer
        .dial_tls(&CancellationToken::new(), "tcp", &format!("localhost:{}", addr.port()))
        .await
        .expect_err("untrusted certificate");
    assert!(err.is_no_address());
    assert_eq!(dialer.stats().dial_attempts, 1);
    assert_eq!(dialer.last_dialed_address("localhost"), None);
}

#[tokio::test]
async fn verify_mode_trusts_configured_root() {
    let (addr, cert) = tls_server().await;
    let dialer = dialer(test_config().with_root_certificate(cert), localhost_resolver());

    let mut conn = dialer
        .dial_tls(&CancellationToken::new(), "tcp", &format!("localhost:{}", addr.port()))
        .await
        .expect("verified tls dial");

    let mut received = Vec::new();
    conn.read_to_end(&mut received).await.expect("read greeting");
    assert_eq!(received, GREETING);
    assert_eq!(dialer.last_dialed_address("localhost"), Some("127.0.0.1".parse().expect("valid")));
}

#[tokio::test]
async fn plain_dial_to_tls_server_is_not_tls() {
    let (addr, _) = tls_server().await;
    let dialer = dialer(test_config(), localhost_resolver());

    let conn = dialer
        .dial(&CancellationToken::new(), "tcp", &format!("localhost:{}", addr.port()))
        .await
        .expect("plain dial");
    assert!(!conn.is_tls());
}

#[tokio::test]
async fn stalled_handshake_moves_on_to_next_candidate() {
    let (addr, _) = tls_server().await;
    silent_listener(addr.port()).await;

    let resolver = Arc::new(
        ScriptedResolver::new().primary("stall.test", Answer::Record(vec!["127.0.0.2", "127.0.0.1"])),
    );
    let dialer = dialer(
        test_config()
            .with_tls_trust(TlsTrust::Insecure)
            .with_connect_timeout(Duration::from_millis(500)),
        resolver,
    );

    let conn = tokio::time::timeout(
        Duration::from_secs(5),
        dialer.dial_tls(&CancellationToken::new(), "tcp", &format!("stall.test:{}", addr.port())),
    )
    .await
    .expect("handshake stall is bounded by the connect timeout")
    .expect("second candidate completes the handshake");

    assert!(conn.is_tls());
    assert_eq!(conn.peer_addr().expect("peer address"), addr);
    assert_eq!(dialer.stats().dial_attempts, 2);
    assert_eq!(dialer.last_dialed_address("stall.test"), Some("127.0.0.1".parse().expect("valid")));
}
