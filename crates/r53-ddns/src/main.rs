// # r53-ddns
//
// Update a Route 53 A record with the current public IP address.
//
// This binary is a thin integration layer: it parses arguments, sets up
// logging, builds the collaborators and runs one `UpdateWorkflow`. All
// decision-making lives in `r53-ddns-core`.
//
// The record must already exist and resolve; the updater only ever replaces
// its value. Run it from cron or a systemd timer:
//
// ```bash
// r53-ddns -i Z0123456789ABCDEFGHIJ -n home.example.com -v
// ```
//
// ## Environment
//
// - `R53_DDNS_HOSTED_ZONE_ID`, `R53_DDNS_NAME`: defaults for `-i` and `-n`
// - `R53_DDNS_MODE=dry-run`: same as `--dry-run`
// - `RUST_LOG`: overrides the level chosen by `-v`/`-vv`
// - the usual `AWS_*` variables for credentials and region

mod prompt;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use r53_ddns_core::{DEFAULT_TTL, SystemResolver, UpdateConfig, UpdateOutcome, UpdateWorkflow};
use r53_ddns_ip_http::{DEFAULT_IP_ENDPOINT, HttpIpSource};
use r53_ddns_provider_route53::Route53Provider;
use std::env;
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing::{Level, debug, error};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Exit codes for the ways a run can end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DdnsExitCode {
    /// Record updated, or already current
    Success = 0,
    /// Missing or invalid configuration
    ConfigError = 1,
    /// IP lookup, resolution or update failed
    RuntimeError = 2,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Parser, Debug)]
#[command(name = "r53-ddns")]
#[command(about = "Update Route 53 record with public IP address", long_about = None)]
#[command(version)]
struct Cli {
    /// Hosted zone id
    #[arg(short = 'i', long, env = "R53_DDNS_HOSTED_ZONE_ID")]
    hosted_zone_id: Option<String>,

    /// Host/DNS name to update
    #[arg(short, long, env = "R53_DDNS_NAME")]
    name: Option<String>,

    /// Informational output; repeat (-vv) for debug output
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Debug output
    #[arg(long)]
    debug: bool,

    /// Record TTL in seconds
    #[arg(long, default_value_t = DEFAULT_TTL)]
    ttl: u32,

    /// Public IP echo endpoint
    #[arg(long, default_value = DEFAULT_IP_ENDPOINT)]
    ip_endpoint: String,

    /// AWS profile to load credentials from
    #[arg(long)]
    profile: Option<String>,

    /// Log the change instead of sending it
    #[arg(long)]
    dry_run: bool,

    /// Fail instead of prompting for a missing zone id or name
    #[arg(long)]
    no_prompt: bool,
}

impl Cli {
    fn log_level(&self) -> Level {
        if self.debug || self.verbose >= 2 {
            Level::DEBUG
        } else if self.verbose == 1 {
            Level::INFO
        } else {
            Level::WARN
        }
    }

    fn dry_run(&self) -> bool {
        self.dry_run
            || env::var("R53_DDNS_MODE").is_ok_and(|mode| mode.eq_ignore_ascii_case("dry-run"))
    }
}

/// Filter directives for a verbosity level
///
/// At debug the AWS and HTTP stacks are held at info; their debug output
/// drowns the updater's own.
fn default_directives(level: Level) -> String {
    if level == Level::DEBUG {
        "debug,aws_config=info,aws_smithy_runtime=info,aws_smithy_runtime_api=info,\
         aws_sdk_route53=info,hyper=info,hyper_util=info,reqwest=info,rustls=info"
            .to_string()
    } else {
        level.to_string().to_lowercase()
    }
}

fn init_tracing(level: Level) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Fill in missing required values
///
/// A value given on the command line or in the environment wins. Otherwise
/// the user is prompted when allowed and stdin is a terminal; if not, the
/// value stays empty and validation reports it.
fn resolve_config(cli: &Cli) -> Result<UpdateConfig> {
    let interactive = !cli.no_prompt && io::stdin().is_terminal();

    let hosted_zone_id = required_value(
        cli.hosted_zone_id.as_deref(),
        interactive,
        "Provide the hosted zone id for your record: ",
    )
    .context("Reading hosted zone id")?;

    let dns_name = required_value(
        cli.name.as_deref(),
        interactive,
        "Provide the record (DNS) name to update: ",
    )
    .context("Reading DNS name")?;

    let config = UpdateConfig::new(hosted_zone_id, dns_name).with_ttl(cli.ttl);
    config.validate()?;
    debug!("Configuration: {}", serde_json::to_string(&config)?);
    Ok(config)
}

fn required_value(given: Option<&str>, interactive: bool, message: &str) -> io::Result<String> {
    match given.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => Ok(value.to_string()),
        None if interactive => {
            prompt::prompt_until_nonempty(&mut io::stdin().lock(), &mut io::stderr(), message)
        }
        None => Ok(String::new()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.log_level()) {
        eprintln!("{:#}", e);
        return DdnsExitCode::ConfigError.into();
    }

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {:#}", e);
            return DdnsExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(run(&cli, config));

    // Runtime failures were already logged by the workflow step that failed
    if let Some(e) = result.as_ref().err().filter(|e| e.is_config()) {
        error!("Configuration error: {}", e);
    }

    exit_code_for(&result).into()
}

/// Map the result of a run onto the process exit code
fn exit_code_for(result: &r53_ddns_core::Result<UpdateOutcome>) -> DdnsExitCode {
    match result {
        Ok(_) => DdnsExitCode::Success,
        Err(e) if e.is_config() => DdnsExitCode::ConfigError,
        Err(_) => DdnsExitCode::RuntimeError,
    }
}

/// Build the collaborators and run the workflow once
async fn run(cli: &Cli, config: UpdateConfig) -> r53_ddns_core::Result<UpdateOutcome> {
    let ip_source = HttpIpSource::new(cli.ip_endpoint.as_str())?;
    let provider = Route53Provider::from_env(cli.profile.as_deref(), cli.dry_run()).await;

    let workflow = UpdateWorkflow::new(
        Box::new(ip_source),
        Box::new(SystemResolver::new()),
        Box::new(provider),
        config,
    )?;

    workflow.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use r53_ddns_core::{Error, UpdateErrorKind};
    use std::net::Ipv4Addr;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn short_flags_parse() {
        let cli = Cli::try_parse_from(["r53-ddns", "-i", "Z123", "-n", "home.example.com"]).unwrap();
        assert_eq!(cli.hosted_zone_id.as_deref(), Some("Z123"));
        assert_eq!(cli.name.as_deref(), Some("home.example.com"));
        assert_eq!(cli.ttl, 60);
        assert_eq!(cli.ip_endpoint, "https://api.ipify.org");
        assert_eq!(cli.log_level(), Level::WARN);
    }

    #[test]
    fn verbosity_levels() {
        let v = Cli::try_parse_from(["r53-ddns", "-v"]).unwrap();
        assert_eq!(v.log_level(), Level::INFO);

        let vv = Cli::try_parse_from(["r53-ddns", "-vv"]).unwrap();
        assert_eq!(vv.log_level(), Level::DEBUG);

        let debug = Cli::try_parse_from(["r53-ddns", "--debug"]).unwrap();
        assert_eq!(debug.log_level(), Level::DEBUG);
    }

    #[test]
    fn debug_directives_quiet_dependencies() {
        let directives = default_directives(Level::DEBUG);
        assert!(directives.starts_with("debug,"));
        assert!(directives.contains("aws_smithy_runtime=info"));
        assert_eq!(default_directives(Level::WARN), "warn");
    }

    #[test]
    fn given_value_is_trimmed() {
        let value = required_value(Some("  Z123 \n"), false, "zone: ").unwrap();
        assert_eq!(value, "Z123");
    }

    #[test]
    fn missing_value_without_prompt_fails_validation() {
        let zone = required_value(None, false, "zone: ").unwrap();
        assert_eq!(zone, "");

        let blank = required_value(Some("   "), false, "zone: ").unwrap();
        assert_eq!(blank, "");

        let err = UpdateConfig::new(zone, "home.example.com")
            .validate()
            .unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("hosted zone id is required"));
        assert_eq!(exit_code_for(&Err(err)), DdnsExitCode::ConfigError);
    }

    #[test]
    fn completed_runs_exit_zero() {
        let ip = Ipv4Addr::new(203, 0, 113, 5);
        let unchanged = Ok(UpdateOutcome::Unchanged { ip });
        let updated = Ok(UpdateOutcome::Updated {
            previous_ip: ip,
            new_ip: Ipv4Addr::new(203, 0, 113, 9),
        });

        assert_eq!(exit_code_for(&unchanged), DdnsExitCode::Success);
        assert_eq!(exit_code_for(&updated), DdnsExitCode::Success);
    }

    #[test]
    fn config_errors_exit_one() {
        // A bad --ip-endpoint surfaces as a config error from the IP source
        let err = HttpIpSource::new("ftp://ip.example.com").unwrap_err();
        assert_eq!(exit_code_for(&Err(err)), DdnsExitCode::ConfigError);
        assert_eq!(
            exit_code_for(&Err(Error::config("TTL must be between 1 and 2147483647 seconds"))),
            DdnsExitCode::ConfigError
        );
    }

    #[test]
    fn runtime_failures_exit_two() {
        let failures = [
            Error::network("Request to https://api.ipify.org failed"),
            Error::invalid_address("<html>Bad Gateway</html>"),
            Error::resolution("home.example.com", "no IPv4 address"),
            Error::update(UpdateErrorKind::Permission, "AccessDenied"),
            Error::update(UpdateErrorKind::Throttled, "PriorRequestNotComplete"),
        ];

        for err in failures {
            let rendered = err.to_string();
            assert_eq!(
                exit_code_for(&Err(err)),
                DdnsExitCode::RuntimeError,
                "{rendered}"
            );
        }
    }

    #[test]
    fn exit_codes_match_documented_values() {
        assert_eq!(DdnsExitCode::Success as u8, 0);
        assert_eq!(DdnsExitCode::ConfigError as u8, 1);
        assert_eq!(DdnsExitCode::RuntimeError as u8, 2);
    }
}
