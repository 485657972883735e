use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; OGTagBot/1.0)";

#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Budget for the whole fetch: every redirect hop, hop validation and the body read.
    pub timeout: Duration,
    pub max_redirects: usize,
    pub max_response_bytes: usize,
    pub user_agent: String,
    /// Run every redirect target through the validator before following it.
    pub revalidate_redirects: bool,
    /// Connect to the addresses the validator checked instead of resolving the name again.
    pub pin_resolved_addrs: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            max_redirects: 20,
            max_response_bytes: 4 * 1024 * 1024, // 4MB
            user_agent: DEFAULT_USER_AGENT.to_string(),
            revalidate_redirects: true,
            pin_resolved_addrs: true,
        }
    }
}
