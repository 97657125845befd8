//! Fluent builder behaviour

use std::io::Write;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use fastdial::{
    AddressRecord, CancellationToken, DialerBuilder, Fastdial, MaxEntries, MemoryStore, ResolveFuture,
    ResolverError, ResolverService, TlsTrust,
};

/// Resolves every name to loopback.
struct Loopback;

impl ResolverService for Loopback {
    fn resolve_primary<'a>(&'a self, hostname: &'a str) -> ResolveFuture<'a> {
        Box::pin(async move {
            Ok(AddressRecord::from_ip(hostname, IpAddr::from([127, 0, 0, 1])))
        })
    }

    fn resolve_fallback<'a>(&'a self, _hostname: &'a str) -> ResolveFuture<'a> {
        Box::pin(async { Err(ResolverError::Unsupported("fallback")) })
    }
}

fn loopback_builder() -> DialerBuilder {
    Fastdial::isolated(Vec::new()).with_parts(
        Arc::new(Loopback),
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryStore::new()),
    )
}

#[test]
fn setters_accumulate_configuration() {
    let builder = Fastdial::builder()
        .allow(["10.0.0.0/8"])
        .deny(["10.0.0.5"])
        .max_retries(2)
        .fallback(false)
        .hosts_file(false)
        .insecure_tls()
        .connect_timeout(Duration::from_secs(3))
        .keepalive(None)
        .eviction(MaxEntries(128));

    let config = builder.config();
    assert_eq!(config.allow, vec!["10.0.0.0/8".to_string()]);
    assert_eq!(config.deny, vec!["10.0.0.5".to_string()]);
    assert_eq!(config.max_retries, 2);
    assert!(!config.enable_fallback);
    assert!(!config.hosts_file);
    assert_eq!(config.tls, TlsTrust::Insecure);
    assert_eq!(config.timeouts.connect, Duration::from_secs(3));
    assert_eq!(config.timeouts.keepalive, None);
    assert_eq!(config.eviction.capacity(), Some(128));
}

#[tokio::test]
async fn builds_with_supplied_parts_and_dials() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local listener");
    let port = listener.local_addr().expect("listener address").port();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            drop(stream);
        }
    });

    let dialer = loopback_builder().build().await.expect("dialer");
    let conn = dialer
        .dial(&CancellationToken::new(), "tcp", &format!("service.test:{port}"))
        .await
        .expect("dial via loopback resolver");

    assert_eq!(conn.peer_addr().expect("peer address").port(), port);
    assert_eq!(
        dialer.last_dialed_address("service.test"),
        Some(IpAddr::from([127, 0, 0, 1]))
    );
}

#[tokio::test]
async fn invalid_policy_fails_the_build() {
    let err = loopback_builder()
        .deny(["300.0.0.1"])
        .build()
        .await
        .expect_err("invalid deny entry");
    assert!(err.is_policy());
}

#[tokio::test]
async fn host_overrides_and_hosts_path_seed_the_cache() {
    let mut hosts = tempfile::NamedTempFile::new().expect("temp hosts file");
    writeln!(hosts, "10.7.0.1 from-file.test").expect("write");

    let dialer = Fastdial::isolated(vec!["127.0.0.1:53".parse().expect("resolver address")])
        .hosts_path(hosts.path())
        .host_override("pinned.test", [IpAddr::from([10, 7, 0, 2])])
        .build()
        .await
        .expect("dialer");

    assert!(dialer.cached_resolution("from-file.test").is_ok());
    let pinned = dialer.cached_resolution("pinned.test").expect("override");
    assert_eq!(pinned.candidates().collect::<Vec<_>>(), vec![IpAddr::from([10, 7, 0, 2])]);
}
