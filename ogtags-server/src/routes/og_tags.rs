use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use ogtags_core::OgTags;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OgTagsQuery {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OgTagsResponse {
    pub url: String,
    pub og_tags: OgTags,
}

pub async fn og_tags(
    State(state): State<AppState>,
    query: Result<Query<OgTagsQuery>, QueryRejection>,
) -> Result<Json<OgTagsResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let page = state.fetcher.fetch_og_tags(&query.url).await?;
    info!(url = %page.url, tags = page.og_tags.len(), "served og tags");

    Ok(Json(OgTagsResponse {
        url: page.url.to_string(),
        og_tags: page.og_tags,
    }))
}
