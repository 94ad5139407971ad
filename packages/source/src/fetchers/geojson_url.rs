//! Direct `GeoJSON` URL fetcher.
//!
//! Fetches a standard `GeoJSON` `FeatureCollection` from any URL that
//! returns one directly (the neighborhood basemap).

use geojson::FeatureCollection;

use crate::SourceError;

/// Fetches all features from a direct `GeoJSON` URL.
///
/// # Errors
///
/// Returns [`SourceError`] if the request fails or the response
/// cannot be parsed.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
) -> Result<FeatureCollection, SourceError> {
    let url = reqwest::Url::parse(url).map_err(|e| SourceError::Conversion {
        message: format!("Invalid URL '{url}': {e}"),
    })?;
    let body = super::get_text(client, url, "GeoJSON").await?;
    let collection = super::parse_feature_collection(&body, "GeoJSON")?;
    log::info!("Fetched {} basemap features", collection.features.len());
    Ok(collection)
}
