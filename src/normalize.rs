use crate::spotify::models::{AudioFeatures, RawAudioFeatures, RawImage, RawTrack, SimplifiedTrack};

/// Pick the album artwork URL to show.
///
/// Spotify orders images largest first; the second entry is the mid-size one.
/// Falls back to the only image, or nothing.
pub fn pick_image(images: &[RawImage]) -> Option<String> {
    match images {
        [_, second, ..] => second.url.clone(),
        [only] => only.url.clone(),
        [] => None,
    }
}

/// Convert a raw Spotify track record into the shape served to the front end.
/// Total over partial records: missing fields become `None` or an empty string.
pub fn simplify(track: &RawTrack) -> SimplifiedTrack {
    let artists = track
        .artists
        .iter()
        .filter_map(|a| a.name.as_deref())
        .collect::<Vec<_>>()
        .join(", ");

    let album = track.album.as_ref();

    SimplifiedTrack {
        id: track.id.clone(),
        name: track.name.clone(),
        artists,
        album: album.and_then(|a| a.name.clone()),
        image: album.and_then(|a| pick_image(&a.images)),
        preview_url: track.preview_url.clone(),
        external_url: track
            .external_urls
            .as_ref()
            .and_then(|urls| urls.spotify.clone()),
        features: None,
    }
}

/// Round a per-track analysis: tempo to whole BPM, the rest to two decimals.
/// Missing values count as zero.
pub fn summarize_features(raw: &RawAudioFeatures) -> AudioFeatures {
    AudioFeatures {
        tempo: raw.tempo.unwrap_or(0.0).round() as i64,
        energy: round2(raw.energy.unwrap_or(0.0)),
        valence: round2(raw.valence.unwrap_or(0.0)),
        danceability: round2(raw.danceability.unwrap_or(0.0)),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
