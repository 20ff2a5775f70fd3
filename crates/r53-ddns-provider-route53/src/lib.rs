// # Route 53 DNS Provider
//
// This crate provides an Amazon Route 53 implementation of `DnsProvider`.
//
// ## Behavior
//
// - One `ChangeResourceRecordSets` call per upsert, action UPSERT
// - No retry, no backoff, no lookup of the current record value
// - Rejections are classified into `UpdateErrorKind` from the AWS error code
// - Dry-run mode logs the change batch and skips the API call
//
// ## Credentials
//
// Resolved through the standard AWS chain (environment, shared config and
// credentials files, SSO, IMDS). Route 53 is a global service, so when no
// region is configured anywhere `us-east-1` is used.
//
// ## API Reference
//
// - ChangeResourceRecordSets:
//   https://docs.aws.amazon.com/Route53/latest/APIReference/API_ChangeResourceRecordSets.html

use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_route53::config::Region;
use aws_sdk_route53::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_route53::types::{
    Change, ChangeAction, ChangeBatch, ResourceRecord, ResourceRecordSet, RrType,
};
use r53_ddns_core::traits::{DnsProvider, RecordChange, RecordType};
use r53_ddns_core::{Error, Result, UpdateErrorKind};

/// Region used when the AWS chain yields none
const FALLBACK_REGION: &str = "us-east-1";

/// Route 53 DNS provider
///
/// # Dry-Run Mode
///
/// When `dry_run` is true, the provider logs the change batch it would send
/// and reports success without calling Route 53.
#[derive(Debug, Clone)]
pub struct Route53Provider {
    /// Route 53 API client
    client: aws_sdk_route53::Client,

    /// Dry-run mode: if true, skip the ChangeResourceRecordSets call
    dry_run: bool,
}

impl Route53Provider {
    /// Create a provider around an existing client
    pub fn new(client: aws_sdk_route53::Client, dry_run: bool) -> Self {
        Self { client, dry_run }
    }

    /// Create a provider from the ambient AWS configuration
    ///
    /// # Parameters
    ///
    /// - `profile`: Named profile from the shared config files, if any
    /// - `dry_run`: If true, never call the mutating API
    pub async fn from_env(profile: Option<&str>, dry_run: bool) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = profile {
            tracing::debug!("Using AWS profile {}", profile);
            loader = loader.profile_name(profile);
        }

        // Region comes from the loader chain, named profile included
        let sdk_config = with_fallback_region(loader.load().await);
        tracing::debug!("AWS region: {:?}", sdk_config.region());

        if dry_run {
            tracing::warn!("Route 53 provider running in DRY-RUN mode - no changes will be made");
        }

        Self::new(aws_sdk_route53::Client::new(&sdk_config), dry_run)
    }

}

/// Fill in `us-east-1` when the AWS chain resolved no region
fn with_fallback_region(config: SdkConfig) -> SdkConfig {
    if config.region().is_some() {
        return config;
    }

    config
        .into_builder()
        .region(Region::new(FALLBACK_REGION))
        .build()
}

#[async_trait]
impl DnsProvider for Route53Provider {
    async fn upsert_a_record(&self, change: &RecordChange) -> Result<()> {
        tracing::info!(
            "Upserting Route 53 record: {} {} -> {} (ttl {}) [mode: {}]",
            change.name,
            change.record_type.as_str(),
            change.value,
            change.ttl,
            if self.dry_run { "DRY-RUN" } else { "LIVE" }
        );

        let batch = build_change_batch(change).map_err(|e| {
            Error::update(
                UpdateErrorKind::Validation,
                format!("Invalid change batch: {}", e),
            )
        })?;

        if self.dry_run {
            tracing::info!(
                "[DRY-RUN] Would send ChangeResourceRecordSets to zone {} with payload: {}",
                change.hosted_zone_id,
                serde_json::to_string(change).unwrap_or_default()
            );
            return Ok(());
        }

        let output = self
            .client
            .change_resource_record_sets()
            .hosted_zone_id(&change.hosted_zone_id)
            .change_batch(batch)
            .send()
            .await
            .map_err(|e| {
                let kind = classify_error_code(e.code());
                Error::update(kind, DisplayErrorContext(&e).to_string())
            })?;

        tracing::debug!("Change info: {:?}", output.change_info());
        tracing::info!("Route 53 accepted change for {}", change.name);
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "route53"
    }
}

/// Translate a record change into a Route 53 change batch
pub fn build_change_batch(
    change: &RecordChange,
) -> std::result::Result<ChangeBatch, aws_sdk_route53::error::BuildError> {
    let rr_type = match change.record_type {
        RecordType::A => RrType::A,
    };

    let record = ResourceRecord::builder()
        .value(change.value.to_string())
        .build()?;

    let record_set = ResourceRecordSet::builder()
        .name(&change.name)
        .r#type(rr_type)
        .ttl(i64::from(change.ttl))
        .resource_records(record)
        .build()?;

    let upsert = Change::builder()
        .action(ChangeAction::Upsert)
        .resource_record_set(record_set)
        .build()?;

    ChangeBatch::builder()
        .comment(&change.comment)
        .changes(upsert)
        .build()
}

/// Map an AWS error code onto an update rejection kind
///
/// Codes come from the Route 53 API reference and the common AWS auth and
/// throttling errors. Errors without a code (transport, timeouts, missing
/// credentials) are `Other`.
pub fn classify_error_code(code: Option<&str>) -> UpdateErrorKind {
    match code {
        Some(
            "AccessDenied"
            | "AccessDeniedException"
            | "InvalidClientTokenId"
            | "UnrecognizedClientException"
            | "ExpiredToken"
            | "ExpiredTokenException"
            | "SignatureDoesNotMatch"
            | "MissingAuthenticationToken",
        ) => UpdateErrorKind::Permission,
        Some(
            "InvalidChangeBatch"
            | "InvalidInput"
            | "NoSuchHostedZone"
            | "InvalidDomainName"
            | "ValidationError",
        ) => UpdateErrorKind::Validation,
        Some(
            "Throttling"
            | "ThrottlingException"
            | "PriorRequestNotComplete"
            | "TooManyRequestsException"
            | "RequestLimitExceeded",
        ) => UpdateErrorKind::Throttled,
        _ => UpdateErrorKind::Other,
    }
}
