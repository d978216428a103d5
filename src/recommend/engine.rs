use futures::future::join_all;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::normalize::simplify;
use crate::recommend::enrichment::enrich;
use crate::spotify::models::{RawArtist, RawTrack, SimplifiedTrack};
use crate::spotify::CatalogApi;

pub const MAX_RECOMMENDATIONS: usize = 12;

const MAX_GENRES: usize = 2;
const GENRE_SEARCH_LIMIT: u32 = 20;
const ARTIST_SEARCH_LIMIT: u32 = 30;
const KEYWORD_SEARCH_LIMIT: u32 = 15;
const MAX_KEYWORD_WORDS: usize = 3;
const MIN_KEYWORD_CHARS: usize = 4;

/// Which fallback search produced a batch of candidates, in merge order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Genre,
    Artist,
    Keyword,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Genre => write!(f, "Genre"),
            Stage::Artist => write!(f, "Artist"),
            Stage::Keyword => write!(f, "Keyword"),
        }
    }
}

/// The result of one upstream query in the fallback pipeline.
#[derive(Debug)]
pub struct StageOutcome {
    pub stage: Stage,
    pub label: String,
    pub result: Result<Vec<RawTrack>>,
}

impl StageOutcome {
    fn new(stage: Stage, label: impl Into<String>, result: Result<Vec<RawTrack>>) -> Self {
        Self {
            stage,
            label: label.into(),
            result,
        }
    }
}

/// Accumulates candidates in discovery order.
#[derive(Debug, Default)]
struct Candidates {
    tracks: Vec<RawTrack>,
}

impl Candidates {
    /// Keeps a successful outcome's tracks and drops a failed one, unless the
    /// failure is fatal, in which case it is handed back to the caller.
    fn absorb(&mut self, outcome: StageOutcome) -> Result<()> {
        match outcome.result {
            Ok(found) => {
                debug!(
                    "{} search for {} returned {} tracks",
                    outcome.stage,
                    outcome.label,
                    found.len()
                );
                self.tracks.extend(found);
                Ok(())
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                debug!("{} search failed for {}: {}", outcome.stage, outcome.label, e);
                Ok(())
            }
        }
    }
}

/// Drop id-less tracks, repeats and the seed itself, keeping first-seen order, then cap.
pub fn dedupe(seed_id: &str, tracks: Vec<RawTrack>, cap: usize) -> Vec<RawTrack> {
    let mut seen: HashSet<String> = HashSet::from([seed_id.to_string()]);
    let mut unique = Vec::new();

    for track in tracks {
        if unique.len() >= cap {
            break;
        }
        let Some(id) = track.id.as_deref() else {
            continue;
        };
        if seen.insert(id.to_string()) {
            unique.push(track);
        }
    }

    unique
}

/// Words of a track title worth a keyword search: among the first three,
/// those longer than three characters.
pub fn keywords(track_name: &str) -> Vec<&str> {
    track_name
        .split_whitespace()
        .take(MAX_KEYWORD_WORDS)
        .filter(|word| word.chars().count() >= MIN_KEYWORD_CHARS)
        .collect()
}

/// Builds "songs like this" lists from a seed track.
///
/// Spotify's `/recommendations` is tried first. When it fails or comes back empty,
/// similar tracks are reassembled from plain searches: the primary artist's genres,
/// the artist's name, and keywords from the seed title. Each of those queries may
/// fail on its own without affecting the others. Only missing or rejected credentials
/// surface as an error.
#[derive(Clone)]
pub struct Recommender {
    catalog: Arc<dyn CatalogApi>,
}

impl Recommender {
    pub fn new(catalog: Arc<dyn CatalogApi>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Arc<dyn CatalogApi> {
        &self.catalog
    }

    /// Recommend up to 12 tracks for `track_id`, annotated with audio features where available.
    pub async fn recommend(&self, track_id: &str) -> Result<Vec<SimplifiedTrack>> {
        let found = self.discover(track_id).await?;

        let mut simplified: Vec<SimplifiedTrack> = found.iter().map(simplify).collect();
        let enriched = enrich(self.catalog.as_ref(), &mut simplified).await;

        info!(
            "Recommending {} tracks for {} ({} with audio features)",
            simplified.len(),
            track_id,
            enriched
        );
        Ok(simplified)
    }

    /// Raw candidate tracks for `track_id`, before normalization.
    pub async fn discover(&self, track_id: &str) -> Result<Vec<RawTrack>> {
        // Judged after dedupe: a list holding only the seed or id-less tracks counts as empty.
        let direct = dedupe(track_id, self.direct(track_id).await?, MAX_RECOMMENDATIONS);
        if !direct.is_empty() {
            return Ok(direct);
        }

        debug!("Using fallback: search-based recommendations");
        self.fallback(track_id).await
    }

    async fn direct(&self, track_id: &str) -> Result<Vec<RawTrack>> {
        debug!("Trying /recommendations for track {}", track_id);

        // An empty answer is treated the same as a failed one.
        match self
            .catalog
            .recommendations(track_id, MAX_RECOMMENDATIONS as u32)
            .await
        {
            Ok(tracks) => {
                debug!("Got {} recommendations from /recommendations", tracks.len());
                Ok(tracks)
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                debug!("Recommendations endpoint failed: {}, trying fallback", e);
                Ok(Vec::new())
            }
        }
    }

    async fn fallback(&self, track_id: &str) -> Result<Vec<RawTrack>> {
        let seed = match self.catalog.track(track_id).await {
            Ok(seed) => seed,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!("Fallback could not fetch seed track {}: {}", track_id, e);
                return Ok(Vec::new());
            }
        };

        let Some(primary) = seed.artists.first() else {
            debug!("Seed track {} has no artists, nothing to search for", track_id);
            return Ok(Vec::new());
        };
        let seed_name = seed.name.as_deref().unwrap_or_default();

        let (genre_outcomes, artist_outcomes, keyword_outcomes) = tokio::join!(
            self.genre_stage(primary),
            self.artist_stage(primary),
            self.keyword_stage(seed_name),
        );

        let mut candidates = Candidates::default();
        for outcome in genre_outcomes?
            .into_iter()
            .chain(artist_outcomes)
            .chain(keyword_outcomes)
        {
            candidates.absorb(outcome)?;
        }

        let unique = dedupe(track_id, candidates.tracks, MAX_RECOMMENDATIONS);
        debug!("Fallback returned {} tracks", unique.len());
        Ok(unique)
    }

    async fn genre_stage(&self, artist: &RawArtist) -> Result<Vec<StageOutcome>> {
        let Some(artist_id) = artist.id.as_deref() else {
            return Ok(Vec::new());
        };

        let genres: Vec<String> = match self.catalog.artist(artist_id).await {
            Ok(profile) => profile.genres.into_iter().take(MAX_GENRES).collect(),
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                debug!("Failed to get artist genres: {}", e);
                Vec::new()
            }
        };

        let searches = genres.iter().map(|genre| {
            let query = format!("genre:{}", genre);
            async move { self.catalog.search_tracks(&query, GENRE_SEARCH_LIMIT).await }
        });
        let results = join_all(searches).await;

        Ok(genres
            .into_iter()
            .zip(results)
            .map(|(genre, result)| StageOutcome::new(Stage::Genre, genre, result))
            .collect())
    }

    async fn artist_stage(&self, artist: &RawArtist) -> Vec<StageOutcome> {
        let Some(name) = artist.name.as_deref() else {
            return Vec::new();
        };

        let result = self
            .catalog
            .search_tracks(&format!("artist:{}", name), ARTIST_SEARCH_LIMIT)
            .await;
        vec![StageOutcome::new(Stage::Artist, name, result)]
    }

    async fn keyword_stage(&self, seed_name: &str) -> Vec<StageOutcome> {
        let words = keywords(seed_name);

        let results = join_all(
            words
                .iter()
                .map(|word| self.catalog.search_tracks(word, KEYWORD_SEARCH_LIMIT)),
        )
        .await;

        words
            .into_iter()
            .zip(results)
            .map(|(word, result)| StageOutcome::new(Stage::Keyword, word, result))
            .collect()
    }
}
