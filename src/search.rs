use tracing::{debug, error};

use crate::error::Result;
use crate::normalize::simplify;
use crate::spotify::models::SimplifiedTrack;
use crate::spotify::CatalogApi;

pub const SEARCH_LIMIT: u32 = 10;

/// Track search for the front end's type-ahead box.
///
/// A blank query short-circuits to no results without touching Spotify. Unlike the
/// recommendation path, any upstream failure is returned to the caller.
pub async fn search(catalog: &dyn CatalogApi, query: &str) -> Result<Vec<SimplifiedTrack>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    debug!("Searching tracks for {:?}", query);
    let found = catalog
        .search_tracks(query, SEARCH_LIMIT)
        .await
        .inspect_err(|e| error!("Search failed: {}", e))?;

    Ok(found.iter().map(simplify).collect())
}
