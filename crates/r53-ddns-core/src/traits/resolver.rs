// # Name Resolver Trait
//
// Defines the interface for resolving the currently published IPv4 address
// of a DNS name.
//
// ## Implementations
//
// - System resolver: [`crate::resolver::SystemResolver`]

use async_trait::async_trait;
use std::net::Ipv4Addr;

/// Trait for forward lookups of a DNS name
#[async_trait]
pub trait NameResolver: Send + Sync {
    /// Resolve `name` to an IPv4 address
    ///
    /// When the name has several A records, the first one the resolver
    /// returns is used.
    ///
    /// # Returns
    ///
    /// - `Ok(Ipv4Addr)`: The published address
    /// - `Err(Error::Resolution)`: No record, NXDOMAIN, no IPv4 answer, or a
    ///   resolver failure
    async fn resolve_v4(&self, name: &str) -> Result<Ipv4Addr, crate::Error>;
}
