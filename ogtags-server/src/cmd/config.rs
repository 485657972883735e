use std::path::Path;
use std::time::Duration;

use ogtags_server::{ConfigError, FileConfig, ServiceConfig};

use crate::PolicyArgs;

/// Defaults, then the config file, then command-line overrides.
pub fn build_service_config(
    config_path: Option<&Path>,
    policy: &PolicyArgs,
) -> Result<ServiceConfig, ConfigError> {
    let mut cfg = ServiceConfig::default();
    if let Some(path) = config_path {
        FileConfig::load(path)?.apply(&mut cfg);
    }
    apply_policy_args(&mut cfg, policy);
    Ok(cfg)
}

fn apply_policy_args(cfg: &mut ServiceConfig, policy: &PolicyArgs) {
    if let Some(ms) = policy.timeout_ms {
        cfg.fetch.timeout = Duration::from_millis(ms);
    }
    if let Some(ms) = policy.dns_timeout_ms {
        cfg.validator.dns_timeout = Duration::from_millis(ms);
    }
    if let Some(n) = policy.max_redirects {
        cfg.fetch.max_redirects = n;
    }
    if let Some(n) = policy.max_response_bytes {
        cfg.fetch.max_response_bytes = n;
    }
    if policy.no_revalidate_redirects {
        cfg.fetch.revalidate_redirects = false;
    }
    if policy.no_pin_dns {
        cfg.fetch.pin_resolved_addrs = false;
    }
    cfg.validator
        .allowed_networks
        .extend(policy.allow_networks.iter().copied());
}
