//! Collaborator traits for the update workflow
//!
//! - [`IpSource`]: look up the caller's public IP
//! - [`NameResolver`]: resolve the currently published address of a name
//! - [`DnsProvider`]: upsert the A record

pub mod ip_source;
pub mod resolver;
pub mod dns_provider;

pub use ip_source::IpSource;
pub use resolver::NameResolver;
pub use dns_provider::{DnsProvider, RecordChange, RecordType};
