//! Socrata `GeoJSON` export fetcher.
//!
//! Fetches line or polygon features from a Socrata `resource.geojson`
//! endpoint with a `$limit` row cap.

use case_map_source_models::StreetsConfig;
use geojson::FeatureCollection;

use crate::SourceError;
use crate::soql::streets_url;

/// Fetches all street features, capped at the configured `$limit`.
///
/// # Errors
///
/// Returns [`SourceError`] if the request fails or the response
/// cannot be parsed.
pub async fn fetch(
    client: &reqwest::Client,
    config: &StreetsConfig,
) -> Result<FeatureCollection, SourceError> {
    let url = streets_url(config)?;
    let body = super::get_text(client, url, "Socrata GeoJSON").await?;
    let collection = super::parse_feature_collection(&body, "Socrata GeoJSON")?;

    if collection.features.len() >= config.limit as usize {
        log::warn!(
            "Street response hit the $limit of {}; segments may be missing",
            config.limit
        );
    }
    log::info!("Fetched {} street features", collection.features.len());
    Ok(collection)
}
