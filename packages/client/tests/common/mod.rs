//! Shared fixtures for dialer integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use fastdial_client::cache::StoreError;
use fastdial_client::error;
use fastdial_client::{
    AddressRecord, Dialer, DialerConfig, KvStore, MemoryStore, ResolveFuture, ResolverError,
    ResolverService,
};

/// Answer handed out by the scripted resolver for one hostname.
#[derive(Clone)]
pub enum Answer {
    Record(Vec<&'static str>),
    Fail,
}

/// Resolver service answering from fixed tables and counting calls.
#[derive(Default)]
pub struct ScriptedResolver {
    primary: HashMap<String, Answer>,
    fallback: HashMap<String, Answer>,
    delay: Option<Duration>,
    pub primary_calls: AtomicUsize,
    pub fallback_calls: AtomicUsize,
}

impl ScriptedResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary(mut self, host: &str, answer: Answer) -> Self {
        self.primary.insert(host.to_string(), answer);
        self
    }

    pub fn fallback(mut self, host: &str, answer: Answer) -> Self {
        self.fallback.insert(host.to_string(), answer);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn primary_calls(&self) -> usize {
        self.primary_calls.load(Ordering::SeqCst)
    }

    pub fn fallback_calls(&self) -> usize {
        self.fallback_calls.load(Ordering::SeqCst)
    }

    async fn answer(&self, table: &HashMap<String, Answer>, hostname: &str) -> Result<AddressRecord, ResolverError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match table.get(hostname) {
            Some(Answer::Record(ips)) => Ok(AddressRecord::from_ips(
                hostname,
                ips.iter().map(|ip| ip.parse::<IpAddr>().expect("scripted ip")),
            )),
            Some(Answer::Fail) | None => Err(ResolverError::lookup_failed(format!("no answer for {hostname}"))),
        }
    }
}

impl ResolverService for ScriptedResolver {
    fn resolve_primary<'a>(&'a self, hostname: &'a str) -> ResolveFuture<'a> {
        self.primary_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(self.answer(&self.primary, hostname))
    }

    fn resolve_fallback<'a>(&'a self, hostname: &'a str) -> ResolveFuture<'a> {
        self.fallback_calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(self.answer(&self.fallback, hostname))
    }
}

/// Store whose writes always fail; reads always miss.
#[derive(Default)]
pub struct FailingStore;

impl KvStore for FailingStore {
    fn get(&self, _key: &str) -> Option<Vec<u8>> {
        None
    }

    fn set(&self, _key: &str, _value: Vec<u8>) -> fastdial_client::Result<()> {
        Err(error::cache_io(StoreError::Write("disk full".to_string())))
    }

    fn remove(&self, _key: &str) -> bool {
        false
    }

    fn len(&self) -> usize {
        0
    }

    fn clear(&self) {}

    fn close(&self) {}
}

pub fn test_config() -> DialerConfig {
    DialerConfig::isolated(Vec::new()).with_connect_timeout(Duration::from_secs(1))
}

/// Dialer over a scripted resolver and fresh in-memory stores.
pub fn dialer(config: DialerConfig, resolver: Arc<ScriptedResolver>) -> Dialer {
    Dialer::with_parts(
        config,
        resolver,
        Arc::new(MemoryStore::new()),
        Arc::new(MemoryStore::new()),
    )
    .expect("dialer from parts")
}

/// Plain TCP listener that accepts and immediately drops connections.
pub async fn accepting_listener() -> std::net::SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            drop(stream);
        }
    });
    addr
}
