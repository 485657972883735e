use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ogtags_fetch::FetchError;
use serde_json::json;
use tracing::warn;

/// Request failures as the client sees them. The body is always
/// `{"detail": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The URL was rejected before fetching, or led to an internal address.
    #[error("{0}")]
    BadRequest(String),
    /// The target failed: connection error or error status.
    #[error("Failed to fetch URL: {0}")]
    BadGateway(String),
    #[error("Request to the URL timed out")]
    GatewayTimeout,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl From<FetchError> for ApiError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Denied(reason) => Self::BadRequest(reason.to_string()),
            e @ FetchError::RedirectDenied { .. } => Self::BadRequest(e.to_string()),
            FetchError::Timeout => Self::GatewayTimeout,
            other => Self::BadGateway(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!(%status, error = %self, "og tag request failed");
        }
        (status, Json(json!({"detail": self.to_string()}))).into_response()
    }
}
