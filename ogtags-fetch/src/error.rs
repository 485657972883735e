use ogtags_core::DenyReason;

use crate::client::HttpError;

#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Denied(#[from] DenyReason),
    #[error("redirect to {location} blocked: {reason}")]
    RedirectDenied { location: String, reason: DenyReason },
    #[error("request timed out")]
    Timeout,
    #[error("HTTP {0}")]
    Status(u16),
    #[error("{0}")]
    Network(String),
    #[error("response too large (>{max_bytes} bytes)")]
    ResponseTooLarge { max_bytes: usize },
    #[error("too many redirects (max {max})")]
    TooManyRedirects { max: usize },
    #[error("invalid redirect location {location:?}: {message}")]
    InvalidRedirect { location: String, message: String },
    #[error("{0}")]
    Other(String),
}

impl From<HttpError> for FetchError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::Timeout => Self::Timeout,
            HttpError::Network(msg) => Self::Network(msg),
            HttpError::ResponseTooLarge { max_bytes } => Self::ResponseTooLarge { max_bytes },
            HttpError::Other(msg) => Self::Other(msg),
        }
    }
}
