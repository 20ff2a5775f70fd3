// # DNS Provider Trait
//
// Defines the interface for changing DNS records via a provider API.
//
// ## Implementations
//
// - Route 53: `r53-ddns-provider-route53` crate
//
// ## Usage
//
// ```rust,ignore
// use r53_ddns_core::{DnsProvider, RecordChange};
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let provider = /* DnsProvider implementation */;
//     let change = RecordChange::a_record(
//         "Z123",
//         "home.example.com",
//         60,
//         std::net::Ipv4Addr::new(203, 0, 113, 9),
//         "Updated home.example.com programmatically",
//     );
//     provider.upsert_a_record(&change).await?;
//     Ok(())
// }
// ```

use async_trait::async_trait;
use serde::Serialize;
use std::net::Ipv4Addr;

/// DNS record type carried by a [`RecordChange`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordType {
    /// IPv4 address record
    A,
}

impl RecordType {
    /// Wire name of the record type
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
        }
    }
}

/// A single create-or-update request for one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordChange {
    /// Zone that owns the record
    pub hosted_zone_id: String,
    /// Record name
    pub name: String,
    /// Record type
    #[serde(rename = "type")]
    pub record_type: RecordType,
    /// TTL in seconds
    pub ttl: u32,
    /// New record value
    pub value: Ipv4Addr,
    /// Human-readable change comment
    pub comment: String,
}

impl RecordChange {
    /// Build an A record upsert
    pub fn a_record(
        hosted_zone_id: impl Into<String>,
        name: impl Into<String>,
        ttl: u32,
        value: Ipv4Addr,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            hosted_zone_id: hosted_zone_id.into(),
            name: name.into(),
            record_type: RecordType::A,
            ttl,
            value,
            comment: comment.into(),
        }
    }
}

/// Trait for DNS provider implementations
///
/// Providers are single-shot: one call, one API request, no retry and no
/// decision about whether an update is needed. That decision belongs to
/// [`crate::UpdateWorkflow`].
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Create or replace the record described by `change`
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The provider accepted the change
    /// - `Err(Error::Update)`: The provider rejected it
    async fn upsert_a_record(&self, change: &RecordChange) -> Result<(), crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
