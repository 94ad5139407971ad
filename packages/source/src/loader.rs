//! Ordered loading of the three map layers.
//!
//! The basemap is fetched first and the projection is fitted to it. Only
//! then are streets and cases requested, concurrently with each other, so
//! both are projected in the frame established by the basemap. Street and
//! case completion order is unspecified.
//!
//! A basemap failure aborts the load. A street or case failure is reported
//! to the [`ErrorDisplay`] and leaves that layer empty.

use case_map_case_models::{CaseEvent, Region, StreetSegment};
use case_map_projection::ConicEqualArea;
use case_map_source_models::{DatasetDefinition, DatasetKind};

use crate::normalize::{basemap_geometry, normalize_cases, normalize_regions, normalize_streets};
use crate::{MapDataSource, SourceError};

/// Receives load failures so they can be shown to the user.
pub trait ErrorDisplay: Send + Sync {
    /// Called once per failed dataset.
    fn show_error(&self, dataset: DatasetKind, error: &SourceError);
}

/// An [`ErrorDisplay`] that writes failures to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogErrorDisplay;

impl ErrorDisplay for LogErrorDisplay {
    fn show_error(&self, dataset: DatasetKind, error: &SourceError) {
        log::error!("Failed to load {dataset} layer: {error}");
    }
}

/// Everything fetched for one map, in the projection's frame.
#[derive(Debug, Clone)]
pub struct LoadedMap {
    /// Projection fitted to the basemap.
    pub projection: ConicEqualArea,
    pub regions: Vec<Region>,
    /// All street segments, active and inactive.
    pub streets: Vec<StreetSegment>,
    pub cases: Vec<CaseEvent>,
    /// Datasets that failed to load and were left empty.
    pub failed: Vec<DatasetKind>,
}

/// Builds the unfitted projection described by `definition`.
#[must_use]
pub fn projection_for(definition: &DatasetDefinition) -> ConicEqualArea {
    ConicEqualArea::new()
        .with_parallels(definition.projection.parallels)
        .with_rotate(definition.projection.rotate)
}

/// Loads all three layers from `source`.
///
/// # Errors
///
/// Returns [`SourceError`] if the basemap cannot be fetched or the
/// projection cannot be fitted to it. Street and case failures are reported
/// to `errors` instead.
pub async fn load_map(
    source: &dyn MapDataSource,
    definition: &DatasetDefinition,
    errors: &dyn ErrorDisplay,
) -> Result<LoadedMap, SourceError> {
    log::info!("Loading map data from {}", source.id());

    let basemap = match source.fetch_basemap().await {
        Ok(basemap) => basemap,
        Err(e) => {
            errors.show_error(DatasetKind::Basemap, &e);
            return Err(e);
        }
    };

    let mut projection = projection_for(definition);
    if let Err(e) = projection.fit_size(definition.viewport.size(), &basemap_geometry(&basemap)) {
        let e = SourceError::from(e);
        errors.show_error(DatasetKind::Basemap, &e);
        return Err(e);
    }

    let regions = normalize_regions(&basemap, &definition.basemap.name_field);
    log::info!("Loaded {} basemap regions", regions.len());

    let (streets, cases) = futures::join!(source.fetch_streets(), source.fetch_cases());

    let mut failed = Vec::new();

    let streets = match streets {
        Ok(collection) => normalize_streets(&collection, &definition.streets.active_field),
        Err(e) => {
            errors.show_error(DatasetKind::Streets, &e);
            failed.push(DatasetKind::Streets);
            Vec::new()
        }
    };

    let cases = match cases {
        Ok(records) => normalize_cases(records, &projection),
        Err(e) => {
            errors.show_error(DatasetKind::Cases, &e);
            failed.push(DatasetKind::Cases);
            Vec::new()
        }
    };

    Ok(LoadedMap {
        projection,
        regions,
        streets,
        cases,
        failed,
    })
}
