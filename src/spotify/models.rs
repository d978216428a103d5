use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit JSON `null` the same as a missing field.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Raw Web API shapes. Every field is optional: partial records degrade, they never fail to decode.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTrack {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub artists: Vec<RawArtist>,
    #[serde(default)]
    pub album: Option<RawAlbum>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub external_urls: Option<ExternalUrls>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArtist {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAlbum {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub images: Vec<RawImage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawImage {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

/// Artist profile; only the genre tags are used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawArtistProfile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAudioFeatures {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub tempo: Option<f64>,
    #[serde(default)]
    pub energy: Option<f64>,
    #[serde(default)]
    pub valence: Option<f64>,
    #[serde(default)]
    pub danceability: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub tracks: Option<TrackPage>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TrackPage {
    #[serde(default, deserialize_with = "nullable")]
    pub items: Vec<Option<RawTrack>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RecommendationsResponse {
    #[serde(default, deserialize_with = "nullable")]
    pub tracks: Vec<Option<RawTrack>>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AudioFeaturesResponse {
    #[serde(default, deserialize_with = "nullable")]
    pub audio_features: Vec<Option<RawAudioFeatures>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}

// Shapes served to the front end.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub tempo: i64,
    pub energy: f64,
    pub valence: f64,
    pub danceability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplifiedTrack {
    pub id: Option<String>,
    pub name: Option<String>,
    pub artists: String,
    pub album: Option<String>,
    pub image: Option<String>,
    pub preview_url: Option<String>,
    pub external_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<AudioFeatures>,
}

#[cfg(test)]
impl RawTrack {
    pub fn mock(id: &str, name: &str, artist: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            artists: vec![RawArtist {
                id: Some(format!("{}_artist", id)),
                name: Some(artist.to_string()),
            }],
            album: Some(RawAlbum {
                name: Some("Mock Album".to_string()),
                images: Vec::new(),
            }),
            preview_url: None,
            external_urls: None,
        }
    }
}
