//! System resolver
//!
//! Resolves names through the host's configured resolver (getaddrinfo), the
//! same path any other program on the machine takes. Caching resolvers in
//! between mean the answer can lag a recent update by up to the record TTL.

use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr};

use crate::Error;
use crate::traits::NameResolver;

/// [`NameResolver`] backed by the operating system resolver
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl SystemResolver {
    /// Create a system resolver
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NameResolver for SystemResolver {
    async fn resolve_v4(&self, name: &str) -> Result<Ipv4Addr, Error> {
        // Port is irrelevant; lookup_host wants a socket address.
        let addrs = tokio::net::lookup_host((name, 0))
            .await
            .map_err(|e| Error::resolution(name, e.to_string()))?;

        first_v4(addrs.map(|addr| addr.ip()))
            .ok_or_else(|| Error::resolution(name, "no IPv4 address returned"))
    }
}

fn first_v4(addrs: impl IntoIterator<Item = IpAddr>) -> Option<Ipv4Addr> {
    addrs.into_iter().find_map(|ip| match ip {
        IpAddr::V4(v4) => Some(v4),
        IpAddr::V6(_) => None,
    })
}
