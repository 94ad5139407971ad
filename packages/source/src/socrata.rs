//! Socrata-backed map data source.
//!
//! Serves all three layers of a [`DatasetDefinition`] from Socrata open data
//! endpoints (`data.sfgov.org` for the bundled San Francisco dataset).

use async_trait::async_trait;
use case_map_case_models::CaseRecord;
use case_map_source_models::DatasetDefinition;
use geojson::FeatureCollection;

use crate::fetchers::{geojson_url, socrata_geo, socrata_json};
use crate::{MapDataSource, SourceError};

/// A [`MapDataSource`] reading from Socrata SODA endpoints.
pub struct SocrataMapSource {
    client: reqwest::Client,
    definition: DatasetDefinition,
}

impl SocrataMapSource {
    /// Creates a source for `definition` with a fresh HTTP client.
    #[must_use]
    pub fn new(definition: DatasetDefinition) -> Self {
        Self::with_client(reqwest::Client::new(), definition)
    }

    /// Creates a source sharing an existing HTTP client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client, definition: DatasetDefinition) -> Self {
        Self { client, definition }
    }

    #[must_use]
    pub const fn definition(&self) -> &DatasetDefinition {
        &self.definition
    }
}

#[async_trait]
impl MapDataSource for SocrataMapSource {
    fn id(&self) -> &str {
        &self.definition.id
    }

    async fn fetch_basemap(&self) -> Result<FeatureCollection, SourceError> {
        geojson_url::fetch(&self.client, &self.definition.basemap.url).await
    }

    async fn fetch_streets(&self) -> Result<FeatureCollection, SourceError> {
        socrata_geo::fetch(&self.client, &self.definition.streets).await
    }

    async fn fetch_cases(&self) -> Result<Vec<CaseRecord>, SourceError> {
        socrata_json::fetch(&self.client, &self.definition.cases).await
    }
}
