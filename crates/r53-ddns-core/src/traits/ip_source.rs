// # IP Source Trait
//
// Defines the interface for looking up the caller's public IPv4 address.
//
// ## Implementations
//
// - HTTP echo service: `r53-ddns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use r53_ddns_core::IpSource;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* IpSource implementation */;
//     let body = source.fetch().await?;
//     println!("lookup said: {}", body);
//     Ok(())
// }
// ```

use async_trait::async_trait;

/// Trait for public IP lookup implementations
///
/// `fetch()` returns the raw text the lookup service answered with. Turning
/// it into an address is the workflow's job, so every source gets the same
/// parsing rules.
///
/// A source performs exactly one request per call. It must not retry, and
/// it must not treat a non-success status as a failure on its own: the body
/// is returned whatever the status code was.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Fetch the raw lookup response body
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The response body, untrimmed
    /// - `Err(Error::Network)`: The request could not complete
    async fn fetch(&self) -> Result<String, crate::Error>;

    /// Where the address comes from (for logging)
    fn endpoint(&self) -> &str;
}
