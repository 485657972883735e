use std::collections::BTreeSet;
use std::time::Duration;

use ipnet::IpNet;

#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Schemes that are always refused. Anything else passes the scheme check.
    pub blocked_schemes: BTreeSet<String>,
    /// Hostnames refused without resolving them.
    pub blocked_hosts: BTreeSet<String>,
    /// Hostname suffixes refused without resolving them.
    pub blocked_suffixes: Vec<String>,
    /// Upper bound for one DNS lookup. Hitting it denies the URL.
    pub dns_timeout: Duration,
    /// Networks exempt from address classification (operator escape hatch).
    /// Blocked schemes, hosts and suffixes still apply.
    pub allowed_networks: Vec<IpNet>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            blocked_schemes: ["file", "ftp", "gopher", "data"]
                .into_iter()
                .map(String::from)
                .collect(),
            blocked_hosts: ["localhost", "127.0.0.1", "::1", "0.0.0.0"]
                .into_iter()
                .map(String::from)
                .collect(),
            blocked_suffixes: vec![".local".to_string(), ".internal".to_string()],
            dns_timeout: Duration::from_secs(2),
            allowed_networks: Vec::new(),
        }
    }
}
