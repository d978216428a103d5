use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};
use url::Url;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::spotify::auth::TokenProvider;
use crate::spotify::catalog::CatalogApi;
use crate::spotify::models::{
    AudioFeaturesResponse, RawArtistProfile, RawAudioFeatures, RawTrack, RecommendationsResponse,
    SearchResponse,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound on ids per `/audio-features` request.
pub const AUDIO_FEATURES_BATCH: usize = 100;

/// Authenticated GET client for the Spotify Web API.
///
/// Every request resolves the token anew, so an expired token is replaced on the next call.
/// Nothing is retried: callers decide what a failure means.
#[derive(Clone)]
pub struct SpotifyClient {
    http_client: Client,
    api_base: Url,
    market: String,
    tokens: Arc<TokenProvider>,
}

impl SpotifyClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let tokens = Arc::new(TokenProvider::new(
            http_client.clone(),
            config.credentials(),
            config.token_url.clone(),
        ));

        Ok(Self {
            http_client,
            api_base: config.api_base.clone(),
            market: config.market.clone(),
            tokens,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base.as_str().trim_end_matches('/'), path)
    }

    /// GET `path` (relative to the API base) and return the raw JSON body.
    pub async fn get_json(&self, path: &str, params: &[(&str, String)]) -> Result<serde_json::Value> {
        self.get(path, params).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T> {
        let token = self.tokens.get_token().await?;

        let response = self
            .http_client
            .get(self.endpoint(path))
            .bearer_auth(token)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                error!("Spotify API error for {}: {}", path, e);
                AppError::upstream(None, e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Spotify API error for {} ({}): {}", path, status, error_text);
            return Err(AppError::upstream(Some(status.as_u16()), error_text));
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl CatalogApi for SpotifyClient {
    fn has_credentials(&self) -> bool {
        self.tokens.has_credentials()
    }

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<RawTrack>> {
        let response: SearchResponse = self
            .get(
                "/search",
                &[
                    ("q", query.to_string()),
                    ("type", "track".to_string()),
                    ("market", self.market.clone()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;

        Ok(response
            .tracks
            .map(|page| page.items.into_iter().flatten().collect())
            .unwrap_or_default())
    }

    async fn track(&self, id: &str) -> Result<RawTrack> {
        self.get(&format!("/tracks/{}", urlencoding::encode(id)), &[])
            .await
    }

    async fn artist(&self, id: &str) -> Result<RawArtistProfile> {
        self.get(&format!("/artists/{}", urlencoding::encode(id)), &[])
            .await
    }

    async fn recommendations(&self, seed_track: &str, limit: u32) -> Result<Vec<RawTrack>> {
        let response: RecommendationsResponse = self
            .get(
                "/recommendations",
                &[
                    ("seed_tracks", seed_track.to_string()),
                    ("limit", limit.to_string()),
                    ("market", self.market.clone()),
                ],
            )
            .await?;

        Ok(response.tracks.into_iter().flatten().collect())
    }

    async fn audio_features(&self, ids: &[String]) -> Result<Vec<RawAudioFeatures>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        if ids.len() > AUDIO_FEATURES_BATCH {
            return Err(AppError::upstream(
                None,
                format!("At most {} ids per audio-features request", AUDIO_FEATURES_BATCH),
            ));
        }

        debug!("Fetching audio features for {} tracks", ids.len());
        let response: AudioFeaturesResponse = self
            .get("/audio-features", &[("ids", ids.join(","))])
            .await?;

        Ok(response.audio_features.into_iter().flatten().collect())
    }
}
