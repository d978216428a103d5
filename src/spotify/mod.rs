pub mod auth;
pub mod catalog;
pub mod client;
pub mod models;

#[cfg(test)]
pub(crate) mod fake;

pub use auth::TokenProvider;
pub use catalog::CatalogApi;
pub use client::{SpotifyClient, AUDIO_FEATURES_BATCH};
pub use models::{AudioFeatures, RawArtistProfile, RawAudioFeatures, RawTrack, SimplifiedTrack};
