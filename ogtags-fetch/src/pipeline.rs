use std::sync::Arc;

use ogtags_core::{extract_og_tags, OgTags, ValidatedUrl, Validator};
use tokio::time::Instant;
use tracing::{debug, warn};
use url::Url;

use crate::client::{HttpClient, HttpRequestParts, HttpResponseParts, ReqwestHttpClient};
use crate::config::FetchConfig;
use crate::decode::decode_html;
use crate::error::FetchError;

/// Tags extracted from one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OgPage {
    /// The requested URL, normalized by the parser.
    pub url: Url,
    /// Where the redirect chain ended.
    pub final_url: Url,
    pub status: u16,
    pub og_tags: OgTags,
}

pub struct OgFetcher {
    validator: Validator,
    client: Arc<dyn HttpClient>,
    cfg: FetchConfig,
}

impl OgFetcher {
    pub fn new(validator: Validator, cfg: FetchConfig) -> Result<Self, FetchError> {
        let client = ReqwestHttpClient::new()?;
        Ok(Self::with_client(validator, Arc::new(client), cfg))
    }

    pub fn with_client(validator: Validator, client: Arc<dyn HttpClient>, cfg: FetchConfig) -> Self {
        Self {
            validator,
            client,
            cfg,
        }
    }

    /// Validates `url`, fetches it and returns its Open Graph tags.
    ///
    /// Validation of the requested URL is bounded by the validator's DNS
    /// timeout; everything after it shares `FetchConfig::timeout`.
    pub async fn fetch_og_tags(&self, url: &str) -> Result<OgPage, FetchError> {
        let validated = self.validator.validate(url).await?;
        let requested = validated.url.clone();

        let deadline = Instant::now() + self.cfg.timeout;
        let (final_url, resp) = tokio::time::timeout_at(deadline, self.follow(validated, deadline))
            .await
            .map_err(|_| FetchError::Timeout)??;

        if !(200..300).contains(&resp.status) {
            warn!(url = %final_url, status = resp.status, "upstream returned non-success status");
            return Err(FetchError::Status(resp.status));
        }

        let html = decode_html(resp.header("content-type"), &resp.body);
        let og_tags = extract_og_tags(&html);
        debug!(url = %final_url, tags = og_tags.len(), "extracted open graph tags");

        Ok(OgPage {
            url: requested,
            final_url,
            status: resp.status,
            og_tags,
        })
    }

    async fn follow(
        &self,
        first: ValidatedUrl,
        deadline: Instant,
    ) -> Result<(Url, HttpResponseParts), FetchError> {
        let mut current = first;
        let mut redirects = 0;
        loop {
            let mut req = HttpRequestParts::get(current.url.clone())
                .with_header("user-agent", &self.cfg.user_agent);
            if self.cfg.pin_resolved_addrs {
                req.pinned_addrs = current.socket_addrs();
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            let resp = self
                .client
                .send(req, remaining, self.cfg.max_response_bytes)
                .await?;

            let Some(location) = redirect_location(&resp).map(str::to_string) else {
                return Ok((current.url, resp));
            };
            if redirects >= self.cfg.max_redirects {
                return Err(FetchError::TooManyRedirects {
                    max: self.cfg.max_redirects,
                });
            }
            redirects += 1;

            let next = current
                .url
                .join(&location)
                .map_err(|e| FetchError::InvalidRedirect {
                    location: location.clone(),
                    message: e.to_string(),
                })?;
            debug!(from = %current.url, to = %next, "following redirect");
            current = self.next_hop(next).await?;
        }
    }

    async fn next_hop(&self, url: Url) -> Result<ValidatedUrl, FetchError> {
        if self.cfg.revalidate_redirects {
            let location = url.to_string();
            return self
                .validator
                .validate_url(url)
                .await
                .map_err(|reason| FetchError::RedirectDenied { location, reason });
        }

        let host = url.host_str().unwrap_or_default().to_string();
        let port = url.port_or_known_default();
        Ok(ValidatedUrl {
            url,
            host,
            port,
            addrs: Vec::new(),
        })
    }
}

/// Statuses that carry a follow-up request. 300 and 304 do not.
const REDIRECT_STATUSES: [u16; 5] = [301, 302, 303, 307, 308];

fn redirect_location(resp: &HttpResponseParts) -> Option<&str> {
    if !REDIRECT_STATUSES.contains(&resp.status) {
        return None;
    }
    resp.header("location")
}
