#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Remote data loading for the case map.
//!
//! A map is assembled from three Socrata datasets: neighborhood polygons
//! (the basemap), street segments, and open service requests. Each data
//! provider implements [`MapDataSource`]; [`loader::load_map`] drives the
//! fetches in the required order (basemap first, then streets and cases
//! concurrently) and normalizes the results into domain records.

pub mod fetchers;
pub mod loader;
pub mod normalize;
pub mod parsing;
pub mod registry;
pub mod socrata;
pub mod soql;

use async_trait::async_trait;
use case_map_case_models::CaseRecord;
use case_map_projection::ProjectionError;
use geojson::FeatureCollection;

/// Errors that can occur during data source operations.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// `GeoJSON` parsing failed.
    #[error("GeoJSON parse error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The basemap could not be used to fit the projection.
    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),

    /// Response or configuration did not have the expected shape.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}

/// Trait that all map data providers must implement.
///
/// Each method performs exactly one fetch. Implementations must not retry;
/// failures are reported to the caller as-is.
#[async_trait]
pub trait MapDataSource: Send + Sync {
    /// Returns a unique identifier for this source.
    fn id(&self) -> &str;

    /// Fetches the neighborhood polygon feature collection.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request or parsing fails.
    async fn fetch_basemap(&self) -> Result<FeatureCollection, SourceError>;

    /// Fetches the street segment feature collection.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request or parsing fails.
    async fn fetch_streets(&self) -> Result<FeatureCollection, SourceError>;

    /// Fetches raw service request records.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] if the request or parsing fails.
    async fn fetch_cases(&self) -> Result<Vec<CaseRecord>, SourceError>;
}
