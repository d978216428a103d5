pub mod error;
pub mod handlers;

use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::recommend::Recommender;
use crate::spotify::{CatalogApi, SpotifyClient};

pub use error::ApiError;
pub use handlers::ItemsResponse;

#[derive(Clone)]
pub struct AppState {
    pub recommender: Recommender,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogApi>) -> Self {
        Self {
            recommender: Recommender::new(catalog),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/search", get(handlers::search))
        .route("/api/recommendations", get(handlers::recommendations))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `config.host:config.port` and serve until the process is stopped.
pub async fn serve(config: &Config) -> Result<()> {
    let client = SpotifyClient::new(config)?;
    let app = build_router(AppState::new(Arc::new(client)));

    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
