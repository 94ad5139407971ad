//! Fetchers for the Socrata endpoint shapes a map uses.
//!
//! Each fetcher performs a single GET and parses the body. Non-success
//! status codes and bodies of the wrong shape are errors; nothing is
//! retried.

pub mod geojson_url;
pub mod socrata_geo;
pub mod socrata_json;

use geojson::{FeatureCollection, GeoJson};
use reqwest::Url;

use crate::SourceError;

/// Sends a GET request and returns the body text.
///
/// # Errors
///
/// Returns [`SourceError`] if the request fails or the server responds
/// with a non-success status.
pub async fn get_text(
    client: &reqwest::Client,
    url: Url,
    label: &str,
) -> Result<String, SourceError> {
    log::debug!("Fetching {label}: {url}");
    let resp = client.get(url).send().await?;
    if !resp.status().is_success() {
        return Err(SourceError::Conversion {
            message: format!("{label} request failed with status {}", resp.status()),
        });
    }
    Ok(resp.text().await?)
}

/// Parses a response body as a `GeoJSON` `FeatureCollection`.
///
/// # Errors
///
/// Returns [`SourceError`] if the body is not valid `GeoJSON` or is a bare
/// geometry/feature rather than a collection.
pub fn parse_feature_collection(body: &str, label: &str) -> Result<FeatureCollection, SourceError> {
    match body.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        GeoJson::Feature(_) | GeoJson::Geometry(_) => Err(SourceError::Conversion {
            message: format!("No features array in {label} response"),
        }),
    }
}
