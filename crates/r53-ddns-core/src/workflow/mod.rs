//! The update workflow
//!
//! One run, four steps, strictly in order:
//!
//! ```text
//! IpSource::fetch ──► parse ──► NameResolver::resolve_v4 ──► compare
//!                                                              │
//!                                          equal ◄─────────────┴─────► different
//!                                            │                            │
//!                                        Unchanged              DnsProvider::upsert_a_record
//!                                                                         │
//!                                                                      Updated
//! ```
//!
//! A failing step stops the run; later collaborators are never called.

use chrono::{Local, NaiveDateTime};
use std::net::Ipv4Addr;
use tracing::{debug, error, info, warn};

use crate::config::UpdateConfig;
use crate::error::{Error, Result};
use crate::traits::{DnsProvider, IpSource, NameResolver, RecordChange};

/// Longest slice of a bad lookup body echoed back in errors
const MAX_ECHOED_BODY: usize = 64;

/// What a completed run did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The name already resolves to the current IP
    Unchanged {
        /// The shared address
        ip: Ipv4Addr,
    },
    /// The record was upserted
    Updated {
        /// Address the name resolved to before the run
        previous_ip: Ipv4Addr,
        /// Address now published
        new_ip: Ipv4Addr,
    },
}

/// Single-run dynamic DNS updater
pub struct UpdateWorkflow {
    ip_source: Box<dyn IpSource>,
    resolver: Box<dyn NameResolver>,
    provider: Box<dyn DnsProvider>,
    config: UpdateConfig,
}

impl UpdateWorkflow {
    /// Create a workflow
    ///
    /// The configuration is validated here so a bad zone id or name never
    /// reaches the network.
    pub fn new(
        ip_source: Box<dyn IpSource>,
        resolver: Box<dyn NameResolver>,
        provider: Box<dyn DnsProvider>,
        config: UpdateConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            ip_source,
            resolver,
            provider,
            config,
        })
    }

    /// Run the workflow once
    pub async fn run(&self) -> Result<UpdateOutcome> {
        info!("Hosted Zone ID: {}", self.config.hosted_zone_id);
        info!("DNS name: {}", self.config.dns_name);
        info!("API endpoint: {}", self.ip_source.endpoint());

        let body = self.ip_source.fetch().await.inspect_err(|e| {
            error!("API get method failed: {}", e);
        })?;

        let current_ip = parse_public_ip(&body).inspect_err(|e| {
            error!("IP lookup returned an unusable response: {}", e);
        })?;
        info!("Current IP: {}", current_ip);

        let resolved_ip = self
            .resolver
            .resolve_v4(&self.config.dns_name)
            .await
            .inspect_err(|e| {
                error!("Name resolution failed: {}", e);
            })?;
        info!("Resolved IP: {}", resolved_ip);

        if current_ip == resolved_ip {
            info!(
                "No change, {} resolves to {} which matches current IP",
                self.config.dns_name, resolved_ip
            );
            return Ok(UpdateOutcome::Unchanged { ip: resolved_ip });
        }

        info!(
            "Current and resolved IP mismatch, updating {} record",
            self.config.dns_name
        );

        let change = RecordChange::a_record(
            &self.config.hosted_zone_id,
            &self.config.dns_name,
            self.config.ttl,
            current_ip,
            change_comment(&self.config.dns_name, Local::now().naive_local()),
        );
        debug!(provider = self.provider.provider_name(), ?change, "Submitting record change");

        self.provider.upsert_a_record(&change).await.inspect_err(|e| {
            error!("Unable to update resource record set: {}", e);
        })?;

        warn!(
            "IP address changed from {} to {}; {} record has been updated",
            resolved_ip, current_ip, self.config.dns_name
        );

        Ok(UpdateOutcome::Updated {
            previous_ip: resolved_ip,
            new_ip: current_ip,
        })
    }
}

/// Turn a lookup response body into an IPv4 address
///
/// Surrounding whitespace (the trailing newline some services append) is
/// ignored. Anything else that is not a dotted-quad is rejected, so an error
/// page served with a 5xx never gets published as a record value.
pub fn parse_public_ip(body: &str) -> Result<Ipv4Addr> {
    let trimmed = body.trim();
    trimmed.parse::<Ipv4Addr>().map_err(|_| {
        let echoed: String = trimmed.chars().take(MAX_ECHOED_BODY).collect();
        Error::invalid_address(echoed)
    })
}

/// Change comment recorded with the upsert
pub fn change_comment(dns_name: &str, at: NaiveDateTime) -> String {
    format!(
        "Updated {} programmatically - {}",
        dns_name,
        at.format("%Y-%m-%d %H:%M:%S")
    )
}
