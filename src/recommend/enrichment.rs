use std::collections::HashMap;
use tracing::debug;

use crate::normalize::summarize_features;
use crate::spotify::models::{AudioFeatures, SimplifiedTrack};
use crate::spotify::{CatalogApi, AUDIO_FEATURES_BATCH};

/// Attach audio features to `tracks` where Spotify has them.
///
/// Best effort: ids go out in batches of 100 and a failed batch (typically 403 or 429)
/// just leaves its tracks without features. Returns how many tracks were annotated.
pub async fn enrich(catalog: &dyn CatalogApi, tracks: &mut [SimplifiedTrack]) -> usize {
    let ids: Vec<String> = tracks.iter().filter_map(|t| t.id.clone()).collect();
    if ids.is_empty() {
        return 0;
    }

    let mut features: HashMap<String, AudioFeatures> = HashMap::new();

    for (i, batch) in ids.chunks(AUDIO_FEATURES_BATCH).enumerate() {
        match catalog.audio_features(batch).await {
            Ok(found) => {
                for raw in found {
                    if let Some(id) = raw.id.clone() {
                        features.insert(id, summarize_features(&raw));
                    }
                }
            }
            Err(e) => {
                debug!("Audio features fetch failed for batch {}: {}", i + 1, e);
            }
        }
    }

    let mut enriched = 0;
    for track in tracks.iter_mut() {
        if let Some(found) = track.id.as_ref().and_then(|id| features.get(id)) {
            track.features = Some(found.clone());
            enriched += 1;
        }
    }

    enriched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::simplify;
    use crate::spotify::fake::{tracks, FakeCatalog};
    use crate::spotify::models::RawAudioFeatures;

    fn features_for(id: &str) -> RawAudioFeatures {
        RawAudioFeatures {
            id: Some(id.to_string()),
            tempo: Some(99.5),
            energy: Some(0.333),
            valence: Some(0.5),
            danceability: Some(0.666),
        }
    }

    #[tokio::test]
    async fn test_batches_of_one_hundred() {
        let catalog = FakeCatalog::default();
        let mut simplified: Vec<_> = tracks("t", 150).iter().map(simplify).collect();

        enrich(&catalog, &mut simplified).await;

        assert_eq!(
            catalog.calls(),
            vec!["audio_features:100".to_string(), "audio_features:50".to_string()]
        );
    }

    #[tokio::test]
    async fn test_missing_features_stay_absent() {
        let mut catalog = FakeCatalog::default();
        catalog.features.insert("t-1".to_string(), features_for("t-1"));
        let mut simplified: Vec<_> = tracks("t", 3).iter().map(simplify).collect();

        let enriched = enrich(&catalog, &mut simplified).await;

        assert_eq!(enriched, 1);
        assert!(simplified[0].features.is_none());
        assert_eq!(
            simplified[1].features,
            Some(AudioFeatures {
                tempo: 100,
                energy: 0.33,
                valence: 0.5,
                danceability: 0.67,
            })
        );
        assert!(simplified[2].features.is_none());
    }

    #[tokio::test]
    async fn test_failure_is_swallowed() {
        let mut catalog = FakeCatalog::default();
        catalog.features_fail = true;
        catalog.features.insert("t-0".to_string(), features_for("t-0"));
        let mut simplified: Vec<_> = tracks("t", 2).iter().map(simplify).collect();
        let before = simplified.clone();

        let enriched = enrich(&catalog, &mut simplified).await;

        assert_eq!(enriched, 0);
        assert_eq!(simplified, before);
    }

    #[tokio::test]
    async fn test_no_ids_no_request() {
        let catalog = FakeCatalog::default();
        let mut simplified = Vec::new();

        assert_eq!(enrich(&catalog, &mut simplified).await, 0);
        assert!(catalog.calls().is_empty());
    }
}
