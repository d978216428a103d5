//! Route handlers for the JSON API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::AppError;
use crate::search;
use crate::server::error::ApiError;
use crate::server::AppState;
use crate::spotify::models::SimplifiedTrack;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    #[serde(default)]
    pub track_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ItemsResponse {
    pub items: Vec<SimplifiedTrack>,
}

impl ItemsResponse {
    fn empty() -> Json<Self> {
        Json(Self { items: Vec::new() })
    }
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

/// GET /api/search?q=
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ItemsResponse>, ApiError> {
    if params.q.trim().is_empty() {
        return Ok(ItemsResponse::empty());
    }

    let catalog = state.recommender.catalog();
    if !catalog.has_credentials() {
        return Err(ApiError::CredentialsMissing);
    }

    match search::search(catalog.as_ref(), &params.q).await {
        Ok(items) => Ok(Json(ItemsResponse { items })),
        Err(AppError::CredentialsMissing) => Err(ApiError::CredentialsMissing),
        Err(_) => Err(ApiError::SearchFailed),
    }
}

/// GET /api/recommendations?track_id=
///
/// Upstream trouble never fails this route; at worst the list is empty.
pub async fn recommendations(
    State(state): State<AppState>,
    Query(params): Query<RecommendationParams>,
) -> Result<Json<ItemsResponse>, ApiError> {
    let track_id = params.track_id.trim();
    if track_id.is_empty() {
        return Err(ApiError::MissingTrackId);
    }

    if !state.recommender.catalog().has_credentials() {
        return Err(ApiError::CredentialsMissing);
    }

    match state.recommender.recommend(track_id).await {
        Ok(items) => Ok(Json(ItemsResponse { items })),
        Err(AppError::CredentialsMissing) => Err(ApiError::CredentialsMissing),
        Err(e) => {
            warn!("Recommendations failed for {}: {}", track_id, e);
            Ok(ItemsResponse::empty())
        }
    }
}
