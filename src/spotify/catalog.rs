use async_trait::async_trait;

use crate::error::Result;
use crate::spotify::models::{RawArtistProfile, RawAudioFeatures, RawTrack};

/// The catalog operations the recommendation and search paths depend on.
///
/// Implemented by [`SpotifyClient`](crate::spotify::SpotifyClient); tests swap in fakes.
/// List results drop `null` slots but are otherwise returned in upstream order.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Whether client credentials are configured at all.
    fn has_credentials(&self) -> bool;

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<RawTrack>>;

    async fn track(&self, id: &str) -> Result<RawTrack>;

    async fn artist(&self, id: &str) -> Result<RawArtistProfile>;

    async fn recommendations(&self, seed_track: &str, limit: u32) -> Result<Vec<RawTrack>>;

    /// Looks up at most 100 ids in one request.
    async fn audio_features(&self, ids: &[String]) -> Result<Vec<RawAudioFeatures>>;
}
