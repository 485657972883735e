pub mod health;
pub mod og_tags;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/og-tags", get(og_tags::og_tags))
}
