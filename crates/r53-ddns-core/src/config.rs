//! Configuration for a single update run
//!
//! An [`UpdateConfig`] is built once at startup and passed by reference into
//! the workflow. Nothing here is global or mutated after validation.

use serde::Serialize;

/// TTL applied to the upserted record when none is given
pub const DEFAULT_TTL: u32 = 60;

/// Largest TTL Route 53 accepts
pub const MAX_TTL: u32 = 2_147_483_647;

/// What to update and how
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateConfig {
    /// Hosted zone that owns the record
    pub hosted_zone_id: String,

    /// Fully-qualified name whose A record is managed
    pub dns_name: String,

    /// Record TTL in seconds
    pub ttl: u32,
}

impl UpdateConfig {
    /// Create a configuration with the default TTL
    pub fn new(hosted_zone_id: impl Into<String>, dns_name: impl Into<String>) -> Self {
        Self {
            hosted_zone_id: hosted_zone_id.into(),
            dns_name: dns_name.into(),
            ttl: DEFAULT_TTL,
        }
    }

    /// Set the record TTL
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Validate the configuration
    ///
    /// Fails fast on a missing hosted zone id or name, a malformed name, or a
    /// TTL outside what Route 53 accepts.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.hosted_zone_id.trim().is_empty() {
            return Err(crate::Error::config(
                "hosted zone id is required (--hosted-zone-id)",
            ));
        }

        if self.hosted_zone_id.contains(char::is_whitespace) {
            return Err(crate::Error::config(format!(
                "hosted zone id contains whitespace: {:?}",
                self.hosted_zone_id
            )));
        }

        if self.dns_name.trim().is_empty() {
            return Err(crate::Error::config("DNS name is required (--name)"));
        }

        validate_domain_name(&self.dns_name)?;

        if self.ttl == 0 || self.ttl > MAX_TTL {
            return Err(crate::Error::config(format!(
                "TTL must be between 1 and {} seconds. Got: {}",
                MAX_TTL, self.ttl
            )));
        }

        Ok(())
    }
}

/// Basic RFC 1035 shape check for a DNS name
///
/// A single trailing dot is accepted. Underscores are let through since
/// Route 53 stores them fine.
fn validate_domain_name(domain: &str) -> Result<(), crate::Error> {
    let domain = domain.strip_suffix('.').unwrap_or(domain);

    if domain.len() > 253 {
        return Err(crate::Error::config(format!(
            "Domain name too long: {} chars (max 253). Got: {}",
            domain.len(),
            domain
        )));
    }

    for label in domain.split('.') {
        if label.is_empty() {
            return Err(crate::Error::config(format!(
                "Domain name has empty label: '{}'",
                domain
            )));
        }

        if label.len() > 63 {
            return Err(crate::Error::config(format!(
                "Domain label too long: {} chars (max 63). Label: '{}'",
                label.len(),
                label
            )));
        }

        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(crate::Error::config(format!(
                "Domain label contains invalid characters. Label: '{}'",
                label
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(crate::Error::config(format!(
                "Domain label cannot start or end with hyphen. Label: '{}'",
                label
            )));
        }
    }

    Ok(())
}
