// # r53-ddns-core
//
// Core library for the Route 53 dynamic DNS updater.
//
// ## Overview
//
// One run of the updater is a straight line:
// - **IpSource**: fetch the caller's public IP from an echo service
// - **NameResolver**: resolve what the DNS name currently points at
// - **UpdateWorkflow**: compare the two and, if they differ, ask the
//   **DnsProvider** to upsert the A record
//
// There is no state between runs and nothing is retried. A scheduler
// outside the program decides how often it runs.

pub mod traits;
pub mod workflow;
pub mod resolver;
pub mod config;
pub mod error;

// Re-export core types for convenience
pub use traits::{DnsProvider, IpSource, NameResolver, RecordChange, RecordType};
pub use workflow::{UpdateOutcome, UpdateWorkflow};
pub use resolver::SystemResolver;
pub use config::{DEFAULT_TTL, UpdateConfig};
pub use error::{Error, Result, UpdateErrorKind};
