pub mod config;
pub mod error;
pub mod normalize;
pub mod recommend;
pub mod search;
pub mod server;
pub mod spotify;

pub use config::{Config, Credentials};
pub use error::{AppError, Result};
pub use recommend::Recommender;
pub use server::{build_router, AppState};
pub use spotify::{AudioFeatures, CatalogApi, SimplifiedTrack, SpotifyClient};
