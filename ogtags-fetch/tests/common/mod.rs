//! Minimal HTTP/1.1 upstream for integration tests.
//!
//! Serves canned responses keyed by request path. Unknown paths get 404.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::net::{IpAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use ogtags_core::{StaticResolver, Validator, ValidatorConfig};

/// Hostname the tests use for the upstream; resolved to 127.0.0.1 by a
/// static resolver.
pub const HOST: &str = "og.test";

#[derive(Debug, Clone)]
pub struct Canned {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub delay: Option<Duration>,
    /// Replace `{user-agent}` in the body with the request's User-Agent.
    pub echo_user_agent: bool,
}

impl Canned {
    pub fn html(body: &str) -> Self {
        Self {
            status: 200,
            headers: vec![("Content-Type".to_string(), "text/html; charset=utf-8".to_string())],
            body: body.as_bytes().to_vec(),
            delay: None,
            echo_user_agent: false,
        }
    }

    /// Raw bytes served with the given `Content-Type`.
    pub fn bytes(content_type: &str, body: &[u8]) -> Self {
        Self {
            status: 200,
            headers: vec![("Content-Type".to_string(), content_type.to_string())],
            body: body.to_vec(),
            delay: None,
            echo_user_agent: false,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
            delay: None,
            echo_user_agent: false,
        }
    }

    pub fn redirect(location: &str) -> Self {
        Self::redirect_with(302, location)
    }

    pub fn redirect_with(status: u16, location: &str) -> Self {
        Self {
            status,
            headers: vec![("Location".to_string(), location.to_string())],
            body: Vec::new(),
            delay: None,
            echo_user_agent: false,
        }
    }

    pub fn echo_user_agent(mut self) -> Self {
        self.echo_user_agent = true;
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

pub struct Upstream {
    pub port: u16,
}

impl Upstream {
    pub fn start(routes: Vec<(&str, Canned)>) -> Self {
        let routes: BTreeMap<String, Canned> = routes
            .into_iter()
            .map(|(p, c)| (p.to_string(), c))
            .collect();
        let routes = Arc::new(routes);
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = Arc::clone(&routes);
                thread::spawn(move || handle(stream, &routes));
            }
        });
        Self { port }
    }

    /// `http://og.test:<port><path>`
    pub fn url(&self, path: &str) -> String {
        format!("http://{HOST}:{}{}", self.port, path)
    }

    /// `http://127.0.0.1:<port><path>`
    pub fn ip_url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }
}

/// Validator that resolves [`HOST`] to loopback and exempts loopback from
/// classification; every other internal range stays blocked.
pub fn test_validator() -> Validator {
    let cfg = ValidatorConfig {
        allowed_networks: vec!["127.0.0.0/8".parse().unwrap()],
        ..Default::default()
    };
    let loopback: IpAddr = "127.0.0.1".parse().unwrap();
    let resolver = StaticResolver::new().with_host(HOST, [loopback]);
    Validator::new(cfg).with_resolver(Arc::new(resolver))
}

/// Like [`test_validator`] but also lets the literal `127.0.0.1` through,
/// for tests that must not rely on address pinning.
pub fn literal_loopback_validator() -> Validator {
    let mut cfg = ValidatorConfig {
        allowed_networks: vec!["127.0.0.0/8".parse().unwrap()],
        ..Default::default()
    };
    cfg.blocked_hosts.remove("127.0.0.1");
    Validator::new(cfg)
}

fn handle(mut stream: TcpStream, routes: &BTreeMap<String, Canned>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let path = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    let mut canned = routes.get(&path).cloned().unwrap_or_else(|| Canned::status(404));
    if canned.echo_user_agent {
        let ua = request
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("user-agent"))
            .map(|(_, value)| value.trim().to_string())
            .unwrap_or_default();
        let body = String::from_utf8_lossy(&canned.body).replace("{user-agent}", &ua);
        canned.body = body.into_bytes();
    }
    if let Some(delay) = canned.delay {
        thread::sleep(delay);
    }

    let mut head = format!("HTTP/1.1 {} {}\r\n", canned.status, reason(canned.status));
    for (k, v) in &canned.headers {
        head.push_str(&format!("{k}: {v}\r\n"));
    }
    head.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n",
        canned.body.len()
    ));
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(&canned.body);
    let _ = stream.flush();
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        301 => "Moved Permanently",
        302 => "Found",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
