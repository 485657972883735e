#![forbid(unsafe_code)]

//! HTTP surface of the Open Graph service: routes, status mapping, config
//! loading and logging setup. The `ogtags` binary wires these together.

pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod state;

use tower_http::trace::TraceLayer;

pub use crate::config::{ConfigError, FileConfig, ServiceConfig};
pub use crate::error::ApiError;
pub use crate::routes::og_tags::OgTagsResponse;
pub use crate::state::AppState;

/// The full application router with request tracing.
pub fn app(state: AppState) -> axum::Router {
    routes::router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
