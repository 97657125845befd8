//! Dial orchestration against local listeners

mod common;

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use common::{Answer, FailingStore, ScriptedResolver, accepting_listener, dialer, test_config};
use fastdial_client::{AddressRecord, CancellationToken, Dialer, KvStore, MemoryStore};

fn ip(s: &str) -> IpAddr {
    s.parse().expect("valid ip literal")
}

#[tokio::test]
async fn dials_resolved_host_and_records_winner() {
    let addr = accepting_listener().await;
    let resolver = Arc::new(ScriptedResolver::new().primary("app.test", Answer::Record(vec!["127.0.0.1"])));
    let dialer = dialer(test_config(), resolver);

    let conn = dialer
        .dial(&CancellationToken::new(), "tcp", &format!("app.test:{}", addr.port()))
        .await
        .expect("dial local listener");

    assert!(!conn.is_tls());
    assert_eq!(conn.peer_addr().expect("peer address"), addr);
    assert_eq!(dialer.last_dialed_address("app.test"), Some(ip("127.0.0.1")));

    let stats = dialer.stats();
    assert_eq!(stats.dial_attempts, 1);
    assert_eq!(stats.dial_successes, 1);
}

#[tokio::test]
async fn unreachable_candidate_is_skipped_for_the_next() {
    let addr = accepting_listener().await;
    // Nothing listens on 127.0.0.2 for this port; the listener is bound to
    // 127.0.0.1 only.
    let resolver = Arc::new(
        ScriptedResolver::new().primary("pair.test", Answer::Record(vec!["127.0.0.2", "127.0.0.1"])),
    );
    let dialer = dialer(test_config().with_connect_timeout(Duration::from_millis(500)), resolver);

    let conn = dialer
        .dial(&CancellationToken::new(), "tcp", &format!("pair.test:{}", addr.port()))
        .await
        .expect("second candidate connects");

    assert_eq!(conn.peer_addr().expect("peer address").ip(), ip("127.0.0.1"));
    assert_eq!(dialer.last_dialed_address("pair.test"), Some(ip("127.0.0.1")));
    assert_eq!(dialer.stats().dial_attempts, 2);
}

#[tokio::test]
async fn policy_rejecting_everything_makes_no_attempt() {
    let addr = accepting_listener().await;
    let resolver = Arc::new(ScriptedResolver::new().primary("blocked.test", Answer::Record(vec!["127.0.0.1"])));
    let dialer = dialer(test_config().with_deny(["127.0.0.0/8"]), resolver);

    let err = dialer
        .dial(&CancellationToken::new(), "tcp", &format!("blocked.test:{}", addr.port()))
        .await
        .expect_err("every candidate denied");

    assert!(err.is_no_address());
    let stats = dialer.stats();
    assert_eq!(stats.dial_attempts, 0);
    assert_eq!(stats.policy_rejections, 1);
    assert_eq!(dialer.last_dialed_address("blocked.test"), None);
}

#[tokio::test]
async fn allow_list_limits_attempts_to_members() {
    let resolver = Arc::new(
        ScriptedResolver::new().primary("mixed.test", Answer::Record(vec!["10.0.0.5", "8.8.8.8"])),
    );
    let dialer = dialer(
        test_config()
            .with_allow(["10.0.0.0/8"])
            .with_connect_timeout(Duration::from_millis(200)),
        resolver,
    );

    // 10.0.0.5:9 has nothing listening, so the only admitted candidate fails.
    let err = dialer
        .dial(&CancellationToken::new(), "tcp", "mixed.test:9")
        .await
        .expect_err("admitted candidate is unreachable");
    assert!(err.is_no_address());

    let stats = dialer.stats();
    assert_eq!(stats.policy_rejections, 1);
    assert_eq!(stats.dial_attempts, 1);
    assert_eq!(dialer.last_dialed_address("mixed.test"), None);
}

#[tokio::test]
async fn history_write_failure_fails_the_dial() {
    let addr = accepting_listener().await;
    let resolver = Arc::new(ScriptedResolver::new().primary("app.test", Answer::Record(vec!["127.0.0.1"])));
    let dialer = Dialer::with_parts(
        test_config(),
        resolver,
        Arc::new(MemoryStore::new()),
        Arc::new(FailingStore),
    )
    .expect("dialer from parts");

    let err = dialer
        .dial(&CancellationToken::new(), "tcp", &format!("app.test:{}", addr.port()))
        .await
        .expect_err("history write fails");

    assert!(err.is_cache_io());
    assert_eq!(dialer.stats().dial_attempts, 1);
    assert_eq!(dialer.stats().dial_failures, 1);
}

#[tokio::test]
async fn resolution_cache_write_failure_fails_the_dial() {
    let resolver = Arc::new(ScriptedResolver::new().primary("app.test", Answer::Record(vec!["127.0.0.1"])));
    let dialer = Dialer::with_parts(
        test_config(),
        resolver,
        Arc::new(FailingStore),
        Arc::new(MemoryStore::new()),
    )
    .expect("dialer from parts");

    let err = dialer
        .dial(&CancellationToken::new(), "tcp", "app.test:80")
        .await
        .expect_err("cache write fails");
    assert!(err.is_cache_io());
    assert_eq!(dialer.stats().dial_attempts, 0);
}

#[tokio::test]
async fn unresolvable_host_reports_resolution_failure() {
    let dialer = dialer(test_config(), Arc::new(ScriptedResolver::new()));

    let err = dialer
        .dial(&CancellationToken::new(), "tcp", "nowhere.test:80")
        .await
        .expect_err("unresolvable");
    assert!(err.is_resolution());
    assert_eq!(err.host(), Some("nowhere.test"));
}

#[tokio::test]
async fn literal_addresses_dial_without_resolution() {
    let addr = accepting_listener().await;
    let resolver = Arc::new(ScriptedResolver::new());
    let dialer = dialer(test_config(), resolver.clone());

    let conn = dialer
        .dial(&CancellationToken::new(), "tcp4", &addr.to_string())
        .await
        .expect("literal dial");
    assert_eq!(conn.peer_addr().expect("peer address"), addr);
    assert_eq!(resolver.primary_calls(), 0);
    assert_eq!(dialer.last_dialed_address("127.0.0.1"), Some(ip("127.0.0.1")));
}

#[tokio::test]
async fn family_restricted_network_skips_other_family() {
    let addr = accepting_listener().await;
    let resolver = Arc::new(ScriptedResolver::new().primary("v4only.test", Answer::Record(vec!["127.0.0.1"])));
    let dialer = dialer(test_config(), resolver);

    let err = dialer
        .dial(&CancellationToken::new(), "tcp6", &format!("v4only.test:{}", addr.port()))
        .await
        .expect_err("no ipv6 candidate");
    assert!(err.is_no_address());
}

#[tokio::test]
async fn malformed_inputs_are_rejected() {
    let dialer = dialer(test_config(), Arc::new(ScriptedResolver::new()));
    let cancel = CancellationToken::new();

    let err = dialer.dial(&cancel, "udp", "app.test:53").await.expect_err("udp");
    assert!(err.is_invalid_address());

    let err = dialer.dial(&cancel, "tcp", "app.test").await.expect_err("no port");
    assert!(err.is_invalid_address());
}

#[tokio::test]
async fn cancelled_token_stops_the_dial() {
    let resolver = Arc::new(
        ScriptedResolver::new()
            .primary("slow.test", Answer::Record(vec!["127.0.0.1"]))
            .with_delay(Duration::from_secs(30)),
    );
    let dialer = dialer(test_config(), resolver);
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        trigger.cancel();
    });

    let err = tokio::time::timeout(Duration::from_secs(5), dialer.dial(&cancel, "tcp", "slow.test:80"))
        .await
        .expect("dial returns promptly")
        .expect_err("cancelled");
    assert!(err.is_canceled());
}

#[tokio::test]
async fn closed_dialer_refuses_to_dial() {
    let addr = accepting_listener().await;
    let resolver = Arc::new(ScriptedResolver::new().primary("app.test", Answer::Record(vec!["127.0.0.1"])));
    let dialer = dialer(test_config(), resolver);

    dialer.close();

    let err = dialer
        .dial(&CancellationToken::new(), "tcp", &format!("app.test:{}", addr.port()))
        .await
        .expect_err("stores closed");
    assert!(err.is_cache_io());
}

#[tokio::test]
async fn cached_record_without_addresses_is_no_address_found() {
    let resolver = Arc::new(ScriptedResolver::new());
    let resolution_store = Arc::new(MemoryStore::new());
    let empty = AddressRecord::new("empty.test").to_bytes().expect("encode record");
    resolution_store.set("empty.test", empty).expect("seed store");

    let dialer = Dialer::with_parts(
        test_config(),
        resolver.clone(),
        resolution_store,
        Arc::new(MemoryStore::new()),
    )
    .expect("dialer from parts");

    let err = dialer
        .dial(&CancellationToken::new(), "tcp", "empty.test:80")
        .await
        .expect_err("record has no addresses");
    assert!(err.is_no_address());
    assert_eq!(dialer.stats().dial_attempts, 0);
    assert_eq!(resolver.primary_calls(), 0);
}
