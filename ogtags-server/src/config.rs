use std::net::{Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use ipnet::IpNet;
use ogtags_core::ValidatorConfig;
use ogtags_fetch::FetchConfig;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse config as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Everything the service needs at startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub listen: SocketAddr,
    pub validator: ValidatorConfig,
    pub fetch: FetchConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from((Ipv4Addr::LOCALHOST, 8000)),
            validator: ValidatorConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

/// On-disk config. Every field is optional and overrides the default when set.
///
/// ```yaml
/// listen: 0.0.0.0:8000
/// timeout_ms: 10000
/// allowed_networks: ["10.20.0.0/16"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub listen: Option<SocketAddr>,
    pub timeout_ms: Option<u64>,
    pub dns_timeout_ms: Option<u64>,
    pub max_redirects: Option<usize>,
    pub max_response_bytes: Option<usize>,
    pub user_agent: Option<String>,
    pub revalidate_redirects: Option<bool>,
    pub pin_resolved_addrs: Option<bool>,
    pub blocked_schemes: Option<Vec<String>>,
    pub blocked_hosts: Option<Vec<String>>,
    pub blocked_suffixes: Option<Vec<String>>,
    pub allowed_networks: Option<Vec<IpNet>>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Accepts JSON or YAML. A document that looks like a JSON object is
    /// parsed as JSON so its errors point at the JSON syntax.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        if content.trim_start().starts_with('{') {
            return Ok(serde_json::from_str(content)?);
        }
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn apply(self, cfg: &mut ServiceConfig) {
        if let Some(v) = self.listen {
            cfg.listen = v;
        }
        if let Some(v) = self.timeout_ms {
            cfg.fetch.timeout = Duration::from_millis(v);
        }
        if let Some(v) = self.dns_timeout_ms {
            cfg.validator.dns_timeout = Duration::from_millis(v);
        }
        if let Some(v) = self.max_redirects {
            cfg.fetch.max_redirects = v;
        }
        if let Some(v) = self.max_response_bytes {
            cfg.fetch.max_response_bytes = v;
        }
        if let Some(v) = self.user_agent {
            cfg.fetch.user_agent = v;
        }
        if let Some(v) = self.revalidate_redirects {
            cfg.fetch.revalidate_redirects = v;
        }
        if let Some(v) = self.pin_resolved_addrs {
            cfg.fetch.pin_resolved_addrs = v;
        }
        if let Some(v) = self.blocked_schemes {
            cfg.validator.blocked_schemes = v.iter().map(|s| s.to_ascii_lowercase()).collect();
        }
        if let Some(v) = self.blocked_hosts {
            cfg.validator.blocked_hosts = v.iter().map(|s| s.to_ascii_lowercase()).collect();
        }
        if let Some(v) = self.blocked_suffixes {
            cfg.validator.blocked_suffixes = v.iter().map(|s| s.to_ascii_lowercase()).collect();
        }
        if let Some(v) = self.allowed_networks {
            cfg.validator.allowed_networks = v;
        }
    }
}
