use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;

mod reqwest_client;

pub use reqwest_client::ReqwestHttpClient;

/// One outbound GET. Redirects are never followed by the client itself.
#[derive(Debug, Clone)]
pub struct HttpRequestParts {
    pub url: url::Url,
    pub headers: BTreeMap<String, String>,
    /// Addresses to connect to for the URL's host. Empty means resolve normally.
    pub pinned_addrs: Vec<SocketAddr>,
}

impl HttpRequestParts {
    pub fn get(url: url::Url) -> Self {
        Self {
            url,
            headers: BTreeMap::new(),
            pinned_addrs: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.to_string());
        self
    }
}

#[derive(Debug, Clone)]
pub struct HttpResponseParts {
    pub status: u16,
    /// Header names are lower-cased.
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl HttpResponseParts {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum HttpError {
    #[error("timeout")]
    Timeout,
    #[error("connect/dns/tls error: {0}")]
    Network(String),
    #[error("response too large (>{max_bytes} bytes)")]
    ResponseTooLarge { max_bytes: usize },
    #[error("http error: {0}")]
    Other(String),
}

#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn send(
        &self,
        req: HttpRequestParts,
        timeout: Duration,
        max_response_bytes: usize,
    ) -> Result<HttpResponseParts, HttpError>;
}
