// # HTTP IP Source
//
// Looks up the caller's public IPv4 address with a plain HTTP GET against an
// echo service that answers with the address as the response body.
//
// ## Behavior
//
// - One request per `fetch()`; no retry, no caching
// - Transport failures (connect, TLS, timeout, body read) are `Error::Network`
// - The status code is logged but not judged: the body is handed back as-is
//   and the workflow decides whether it is an address

use r53_ddns_core::traits::IpSource;
use r53_ddns_core::{Error, Result};

use std::time::{Duration, Instant};

/// Echo endpoint used when none is configured
pub const DEFAULT_IP_ENDPOINT: &str = "https://api.ipify.org";

/// Default HTTP timeout for the lookup
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP-based public IP source
#[derive(Debug, Clone)]
pub struct HttpIpSource {
    /// URL to fetch the IP from
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a source for `url`
    ///
    /// The URL must use the http or https scheme.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a source with a custom request timeout
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();

        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(Error::config(format!(
                "IP endpoint must use HTTP or HTTPS scheme. Got: {}",
                url
            )));
        }

        if url.starts_with("http://") {
            tracing::warn!("IP endpoint {} uses plain HTTP; the answer can be tampered with", url);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("r53-ddns/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { url, client })
    }
}

#[async_trait::async_trait]
impl IpSource for HttpIpSource {
    async fn fetch(&self) -> Result<String> {
        let started = Instant::now();

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::network(format!("Request to {} failed: {}", self.url, e)))?;

        let status = response.status();
        tracing::debug!("Request Status: {}", status);
        tracing::debug!("Request Elapsed: {:?}", started.elapsed());
        tracing::debug!("Request Headers: {:?}", response.headers());

        if !status.is_success() {
            tracing::warn!("IP lookup answered with HTTP {}; using the body anyway", status);
        }

        response
            .text()
            .await
            .map_err(|e| Error::network(format!("Failed to read response from {}: {}", self.url, e)))
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
