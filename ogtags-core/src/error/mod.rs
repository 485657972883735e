use std::fmt;
use std::net::IpAddr;

use thiserror::Error;

use crate::address::AddressClass;

/// Why a URL was refused before any request was made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DenyReason {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("URL scheme not allowed: {0}")]
    SchemeNotAllowed(String),
    #[error("Access to internal addresses is not allowed: {host} ({rule})")]
    InternalAddress { host: String, rule: InternalRule },
}

impl DenyReason {
    pub fn internal(host: impl Into<String>, rule: InternalRule) -> Self {
        Self::InternalAddress {
            host: host.into(),
            rule,
        }
    }
}

/// Which host rule fired for an [`DenyReason::InternalAddress`] verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalRule {
    /// Hostname matched a blocked literal (`localhost`, `::1`, ...).
    BlockedHost,
    /// Hostname ends with a blocked suffix.
    BlockedSuffix(String),
    /// DNS resolution failed, timed out, or returned nothing.
    Unresolvable(String),
    /// A resolved address falls in a non-public range.
    Address { ip: IpAddr, class: AddressClass },
}

impl fmt::Display for InternalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlockedHost => write!(f, "blocked hostname"),
            Self::BlockedSuffix(suffix) => write!(f, "blocked suffix {suffix}"),
            Self::Unresolvable(msg) => write!(f, "resolution failed: {msg}"),
            Self::Address { ip, class } => write!(f, "{ip} is {class}"),
        }
    }
}
