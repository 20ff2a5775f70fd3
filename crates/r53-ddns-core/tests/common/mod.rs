//! Test doubles and common utilities for workflow contract tests
//!
//! Every double counts its calls so tests can check which collaborators a
//! run reached. Clones share their counters.

#![allow(dead_code)]

use r53_ddns_core::error::{Error, Result, UpdateErrorKind};
use r53_ddns_core::traits::{DnsProvider, IpSource, NameResolver, RecordChange};
use r53_ddns_core::{UpdateConfig, UpdateWorkflow};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// An IpSource that answers with a fixed body, or fails
#[derive(Clone)]
pub struct CannedIpSource {
    /// `None` simulates a transport failure
    body: Option<String>,
    fetch_call_count: Arc<AtomicUsize>,
}

impl CannedIpSource {
    pub fn answering(body: &str) -> Self {
        Self {
            body: Some(body.to_string()),
            fetch_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            body: None,
            fetch_call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of times fetch() was called
    pub fn fetch_call_count(&self) -> usize {
        self.fetch_call_count.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl IpSource for CannedIpSource {
    async fn fetch(&self) -> Result<String> {
        self.fetch_call_count.fetch_add(1, Ordering::SeqCst);
        self.body
            .clone()
            .ok_or_else(|| Error::network("connection refused"))
    }

    fn endpoint(&self) -> &str {
        "https://ip.test"
    }
}

/// A NameResolver with a fixed answer, or NXDOMAIN
#[derive(Clone)]
pub struct MockResolver {
    answer: Option<Ipv4Addr>,
    resolve_call_count: Arc<AtomicUsize>,
    resolved_names: Arc<Mutex<Vec<String>>>,
}

impl MockResolver {
    pub fn resolving_to(ip: Ipv4Addr) -> Self {
        Self {
            answer: Some(ip),
            resolve_call_count: Arc::new(AtomicUsize::new(0)),
            resolved_names: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn nxdomain() -> Self {
        Self {
            answer: None,
            resolve_call_count: Arc::new(AtomicUsize::new(0)),
            resolved_names: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the number of times resolve_v4() was called
    pub fn resolve_call_count(&self) -> usize {
        self.resolve_call_count.load(Ordering::SeqCst)
    }

    /// Names passed to resolve_v4(), in call order
    pub fn resolved_names(&self) -> Vec<String> {
        self.resolved_names.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl NameResolver for MockResolver {
    async fn resolve_v4(&self, name: &str) -> Result<Ipv4Addr> {
        self.resolve_call_count.fetch_add(1, Ordering::SeqCst);
        self.resolved_names.lock().unwrap().push(name.to_string());
        self.answer
            .ok_or_else(|| Error::resolution(name, "Name or service not known"))
    }
}

/// A DnsProvider that records every change it is handed
#[derive(Clone)]
pub struct MockDnsProvider {
    rejection: Option<UpdateErrorKind>,
    changes: Arc<Mutex<Vec<RecordChange>>>,
}

impl MockDnsProvider {
    pub fn new() -> Self {
        Self {
            rejection: None,
            changes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn rejecting(kind: UpdateErrorKind) -> Self {
        Self {
            rejection: Some(kind),
            changes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get the number of times upsert_a_record() was called
    pub fn upsert_call_count(&self) -> usize {
        self.changes.lock().unwrap().len()
    }

    /// Changes passed to upsert_a_record(), in call order
    pub fn changes(&self) -> Vec<RecordChange> {
        self.changes.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn upsert_a_record(&self, change: &RecordChange) -> Result<()> {
        self.changes.lock().unwrap().push(change.clone());
        match self.rejection {
            Some(kind) => Err(Error::update(kind, "rejected by test double")),
            None => Ok(()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// Helper to create the configuration most tests use
pub fn minimal_config(dns_name: &str) -> UpdateConfig {
    UpdateConfig::new("Z0TESTZONE", dns_name)
}

/// Build a workflow from clones of the doubles
pub fn workflow(
    ip_source: &CannedIpSource,
    resolver: &MockResolver,
    provider: &MockDnsProvider,
    config: UpdateConfig,
) -> UpdateWorkflow {
    UpdateWorkflow::new(
        Box::new(ip_source.clone()),
        Box::new(resolver.clone()),
        Box::new(provider.clone()),
        config,
    )
    .expect("workflow construction succeeds")
}
