//! Error types for the updater
//!
//! Every failure in a run is fatal. Errors are logged where they occur and
//! propagated to the binary, which maps them to an exit code.

use std::fmt;
use thiserror::Error;

/// Result type alias for updater operations
pub type Result<T> = std::result::Result<T, Error>;

/// Why the DNS service rejected a record change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateErrorKind {
    /// Missing credentials or insufficient IAM permissions
    Permission,
    /// Malformed zone id, unknown zone, or an invalid change batch
    Validation,
    /// Throttled or a conflicting change is still in progress
    Throttled,
    /// Anything else, including transport failures to the DNS service
    Other,
}

impl fmt::Display for UpdateErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UpdateErrorKind::Permission => "permission denied",
            UpdateErrorKind::Validation => "invalid request",
            UpdateErrorKind::Throttled => "throttled",
            UpdateErrorKind::Other => "rejected",
        };
        f.write_str(s)
    }
}

/// Core error type for the updater
#[derive(Error, Debug)]
pub enum Error {
    /// Public IP lookup could not complete (connect, TLS, timeout, body read)
    #[error("Network error: {0}")]
    Network(String),

    /// Public IP lookup returned something that is not an IPv4 address
    #[error("Invalid address from IP lookup: {0:?}")]
    InvalidAddress(String),

    /// The DNS name did not resolve to an IPv4 address
    #[error("Name resolution failed for {name}: {message}")]
    Resolution {
        /// The name that was looked up
        name: String,
        /// Resolver detail
        message: String,
    },

    /// The DNS service rejected the record change
    #[error("Update failed ({kind}): {message}")]
    Update {
        /// Classified rejection reason
        kind: UpdateErrorKind,
        /// Provider detail
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create an invalid address error
    pub fn invalid_address(body: impl Into<String>) -> Self {
        Self::InvalidAddress(body.into())
    }

    /// Create a resolution error
    pub fn resolution(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Resolution {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create an update error
    pub fn update(kind: UpdateErrorKind, message: impl Into<String>) -> Self {
        Self::Update {
            kind,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for errors caused by bad input rather than a failing service
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}
