//! In-memory catalog for unit tests, recording every call it receives.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::error::{AppError, Result};
use crate::spotify::catalog::CatalogApi;
use crate::spotify::models::{RawArtistProfile, RawAudioFeatures, RawTrack};

#[derive(Default)]
pub struct FakeCatalog {
    pub credentials_missing: bool,
    pub auth_rejected: bool,
    /// `None` makes the recommendations endpoint fail.
    pub recommendations: Option<Vec<RawTrack>>,
    pub tracks: HashMap<String, RawTrack>,
    pub artists: HashMap<String, RawArtistProfile>,
    pub searches: HashMap<String, Vec<RawTrack>>,
    pub failing_searches: HashSet<String>,
    pub features: HashMap<String, RawAudioFeatures>,
    pub features_fail: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.credentials_missing {
            return Err(AppError::CredentialsMissing);
        }
        if self.auth_rejected {
            return Err(AppError::Auth("invalid_client".into()));
        }
        Ok(())
    }

    fn not_found(what: &str) -> AppError {
        AppError::upstream(Some(404), format!("{} not found", what))
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    fn has_credentials(&self) -> bool {
        !self.credentials_missing
    }

    async fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<RawTrack>> {
        self.record(format!("search:{}", query))?;
        if self.failing_searches.contains(query) {
            return Err(AppError::upstream(None, "operation timed out"));
        }
        let mut found = self.searches.get(query).cloned().unwrap_or_default();
        found.truncate(limit as usize);
        Ok(found)
    }

    async fn track(&self, id: &str) -> Result<RawTrack> {
        self.record(format!("track:{}", id))?;
        self.tracks
            .get(id)
            .cloned()
            .ok_or_else(|| Self::not_found("track"))
    }

    async fn artist(&self, id: &str) -> Result<RawArtistProfile> {
        self.record(format!("artist:{}", id))?;
        self.artists
            .get(id)
            .cloned()
            .ok_or_else(|| Self::not_found("artist"))
    }

    async fn recommendations(&self, seed_track: &str, limit: u32) -> Result<Vec<RawTrack>> {
        self.record(format!("recommendations:{}", seed_track))?;
        match &self.recommendations {
            Some(tracks) => Ok(tracks.iter().take(limit as usize).cloned().collect()),
            None => Err(Self::not_found("recommendations")),
        }
    }

    async fn audio_features(&self, ids: &[String]) -> Result<Vec<RawAudioFeatures>> {
        self.record(format!("audio_features:{}", ids.len()))?;
        if self.features_fail {
            return Err(AppError::upstream(Some(403), "Forbidden"));
        }
        Ok(ids
            .iter()
            .filter_map(|id| self.features.get(id).cloned())
            .collect())
    }
}

/// Tracks `prefix-0 .. prefix-(n-1)`.
pub fn tracks(prefix: &str, n: usize) -> Vec<RawTrack> {
    (0..n)
        .map(|i| {
            let id = format!("{}-{}", prefix, i);
            RawTrack::mock(&id, &format!("Song {}", id), "Someone")
        })
        .collect()
}
