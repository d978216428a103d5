use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors the HTTP routes report to the front end as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("track_id required")]
    MissingTrackId,

    #[error("Spotify credentials not configured")]
    CredentialsMissing,

    #[error("Search failed")]
    SearchFailed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingTrackId => StatusCode::BAD_REQUEST,
            ApiError::CredentialsMissing | ApiError::SearchFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
