use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use tracing::debug;
use url::{Host, Url};

use crate::address::classify_ip;
use crate::error::{DenyReason, InternalRule};
use crate::resolve::{Resolve, SystemResolver};
use crate::validate::ValidatorConfig;

/// `Ok` means the URL may be fetched; `Err` carries the reason it may not.
pub type Verdict = Result<ValidatedUrl, DenyReason>;

/// A URL that passed every check, together with the addresses that were
/// checked. Connecting to exactly these addresses avoids a second lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUrl {
    pub url: Url,
    /// Lower-cased hostname, IPv6 literals without brackets.
    pub host: String,
    /// Explicit or scheme-default port; `None` for schemes without a default.
    pub port: Option<u16>,
    pub addrs: Vec<IpAddr>,
}

impl ValidatedUrl {
    pub fn socket_addrs(&self) -> Vec<SocketAddr> {
        let port = self.port.unwrap_or(0);
        self.addrs.iter().map(|ip| SocketAddr::new(*ip, port)).collect()
    }
}

/// Decides whether a URL is safe to fetch from this host.
///
/// Checks run in a fixed order and stop at the first failure: parse, scheme
/// denylist, literal hostnames, hostname suffixes, DNS resolution (failure
/// denies), then classification of every resolved address. One non-public
/// address is enough to deny the whole hostname.
#[derive(Clone)]
pub struct Validator {
    cfg: ValidatorConfig,
    resolver: Arc<dyn Resolve>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

impl Validator {
    pub fn new(cfg: ValidatorConfig) -> Self {
        Self {
            cfg,
            resolver: Arc::new(SystemResolver),
        }
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn Resolve>) -> Self {
        self.resolver = resolver;
        self
    }

    pub async fn validate(&self, url: &str) -> Verdict {
        match Url::parse(url) {
            Ok(parsed) => self.validate_url(parsed).await,
            Err(e) => {
                let reason = DenyReason::InvalidUrl(e.to_string());
                debug!(url, %reason, "url denied");
                Err(reason)
            }
        }
    }

    pub async fn validate_url(&self, url: Url) -> Verdict {
        let verdict = self.run(url).await;
        match &verdict {
            Ok(v) => debug!(url = %v.url, addrs = ?v.addrs, "url allowed"),
            Err(reason) => debug!(%reason, "url denied"),
        }
        verdict
    }

    async fn run(&self, url: Url) -> Verdict {
        let (host, port) = self.precheck(&url)?;
        let addrs = self.resolve(&host, port).await?;
        self.check_addrs(&host, &addrs)?;
        Ok(ValidatedUrl {
            url,
            host,
            port,
            addrs,
        })
    }

    /// The checks that need no network access. Returns the normalized host
    /// and port on success.
    pub fn precheck(&self, url: &Url) -> Result<(String, Option<u16>), DenyReason> {
        let host = host_of(url).ok_or_else(|| DenyReason::InvalidUrl("missing hostname".to_string()))?;

        let scheme = url.scheme().to_ascii_lowercase();
        if self.cfg.blocked_schemes.contains(&scheme) {
            return Err(DenyReason::SchemeNotAllowed(scheme));
        }

        // "localhost." and "localhost" name the same host.
        let bare = host.trim_end_matches('.');
        if self.cfg.blocked_hosts.contains(&host) || self.cfg.blocked_hosts.contains(bare) {
            return Err(DenyReason::internal(host, InternalRule::BlockedHost));
        }
        if let Some(suffix) = self
            .cfg
            .blocked_suffixes
            .iter()
            .find(|s| bare.ends_with(s.as_str()))
        {
            let rule = InternalRule::BlockedSuffix(suffix.clone());
            return Err(DenyReason::internal(host, rule));
        }

        Ok((host, url.port_or_known_default()))
    }

    async fn resolve(&self, host: &str, port: Option<u16>) -> Result<Vec<IpAddr>, DenyReason> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(vec![ip]);
        }

        let unresolvable = |msg: String| DenyReason::internal(host, InternalRule::Unresolvable(msg));
        let lookup = self.resolver.resolve(host, port.unwrap_or(0));
        let addrs = match tokio::time::timeout(self.cfg.dns_timeout, lookup).await {
            Ok(Ok(addrs)) => addrs,
            Ok(Err(e)) => return Err(unresolvable(e.to_string())),
            Err(_) => {
                return Err(unresolvable(format!(
                    "lookup timed out after {}ms",
                    self.cfg.dns_timeout.as_millis()
                )))
            }
        };
        if addrs.is_empty() {
            return Err(unresolvable("no addresses".to_string()));
        }
        Ok(addrs)
    }

    fn check_addrs(&self, host: &str, addrs: &[IpAddr]) -> Result<(), DenyReason> {
        for ip in addrs {
            if self.cfg.allowed_networks.iter().any(|net| net.contains(ip)) {
                continue;
            }
            if let Some(class) = classify_ip(*ip) {
                return Err(DenyReason::internal(host, InternalRule::Address { ip: *ip, class }));
            }
        }
        Ok(())
    }
}

fn host_of(url: &Url) -> Option<String> {
    match url.host()? {
        Host::Domain(d) if d.is_empty() => None,
        Host::Domain(d) => Some(d.to_ascii_lowercase()),
        Host::Ipv4(ip) => Some(ip.to_string()),
        Host::Ipv6(ip) => Some(ip.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn precheck_strips_ipv6_brackets() {
        let v = Validator::default();
        let err = v.precheck(&parse("http://[::1]:8080/")).unwrap_err();
        assert_eq!(err, DenyReason::internal("::1", InternalRule::BlockedHost));
    }

    #[test]
    fn precheck_reports_default_port() {
        let v = Validator::default();
        let (host, port) = v.precheck(&parse("https://Example.com/a")).unwrap();
        assert_eq!(host, "example.com");
        assert_eq!(port, Some(443));
    }

    #[test]
    fn precheck_treats_trailing_dot_as_same_host() {
        let v = Validator::default();
        assert!(v.precheck(&parse("http://localhost./")).is_err());
        assert!(v.precheck(&parse("http://printer.local./")).is_err());
    }

    #[test]
    fn socket_addrs_use_validated_port() {
        let validated = ValidatedUrl {
            url: parse("https://example.com/"),
            host: "example.com".to_string(),
            port: Some(443),
            addrs: vec!["93.184.216.34".parse().unwrap()],
        };
        assert_eq!(
            validated.socket_addrs(),
            vec!["93.184.216.34:443".parse::<SocketAddr>().unwrap()]
        );
    }
}
