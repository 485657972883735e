use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{HttpClient, HttpError, HttpRequestParts, HttpResponseParts};

/// Pinned clients kept for reuse. The cache is dropped wholesale when full.
const MAX_PINNED_CLIENTS: usize = 64;

type PinKey = (String, Vec<SocketAddr>);

pub struct ReqwestHttpClient {
    client: reqwest::Client,
    pinned: Mutex<HashMap<PinKey, reqwest::Client>>,
}

impl ReqwestHttpClient {
    pub fn new() -> Result<Self, HttpError> {
        let client = builder()
            .build()
            .map_err(|e| HttpError::Other(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            pinned: Mutex::new(HashMap::new()),
        })
    }

    /// The shared client, or a client whose resolver is pinned to the
    /// already-validated addresses. Pinned clients are cached per host and
    /// address set so repeated fetches reuse TLS config and connections.
    fn client_for(&self, req: &HttpRequestParts) -> Result<reqwest::Client, HttpError> {
        let host = match req.url.host() {
            Some(url::Host::Domain(d)) if !req.pinned_addrs.is_empty() => d,
            _ => return Ok(self.client.clone()),
        };

        let mut addrs = req.pinned_addrs.clone();
        addrs.sort();
        let key = (host.to_string(), addrs);

        let mut pinned = self.pinned.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(client) = pinned.get(&key) {
            return Ok(client.clone());
        }
        let client = builder()
            .resolve_to_addrs(host, &key.1)
            .build()
            .map_err(|e| HttpError::Other(format!("failed to create pinned HTTP client: {e}")))?;
        if pinned.len() >= MAX_PINNED_CLIENTS {
            pinned.clear();
        }
        pinned.insert(key, client.clone());
        Ok(client)
    }

    #[cfg(test)]
    fn pinned_len(&self) -> usize {
        self.pinned.lock().map(|p| p.len()).unwrap_or(0)
    }
}

fn builder() -> reqwest::ClientBuilder {
    // Redirects are followed by the caller so every hop can be validated.
    // A proxy would connect on our behalf and bypass address pinning.
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn send(
        &self,
        req: HttpRequestParts,
        timeout: Duration,
        max_response_bytes: usize,
    ) -> Result<HttpResponseParts, HttpError> {
        let client = self.client_for(&req)?;
        let mut rb = client.get(req.url).timeout(timeout);
        for (k, v) in req.headers {
            rb = rb.header(k, v);
        }

        let mut resp = rb.send().await.map_err(map_reqwest_error)?;
        let status = resp.status().as_u16();

        let mut headers = BTreeMap::new();
        for (k, v) in resp.headers().iter() {
            if let Ok(s) = v.to_str() {
                headers.insert(k.as_str().to_string(), s.to_string());
            }
        }

        if resp.content_length().is_some_and(|len| len > max_response_bytes as u64) {
            return Err(HttpError::ResponseTooLarge { max_bytes: max_response_bytes });
        }

        let mut body = Vec::new();
        while let Some(chunk) = resp.chunk().await.map_err(map_reqwest_error)? {
            if body.len() + chunk.len() > max_response_bytes {
                return Err(HttpError::ResponseTooLarge { max_bytes: max_response_bytes });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(HttpResponseParts { status, headers, body })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        return HttpError::Timeout;
    }
    if e.is_connect() || e.is_request() {
        return HttpError::Network(e.to_string());
    }
    HttpError::Other(e.to_string())
}
