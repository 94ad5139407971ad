//! Normalizes raw `GeoJSON` features and Socrata rows into domain records.
//!
//! Features with missing names or unusable geometry are skipped, as are
//! case rows whose coordinates cannot be projected. Skips are counted and
//! logged, never fatal.

use case_map_case_models::{CASE_RADIUS, CaseEvent, CaseRecord, Region, StreetSegment};
use case_map_projection::ConicEqualArea;
use geo::{Geometry, GeometryCollection, MultiLineString, MultiPolygon};
use geojson::{Feature, FeatureCollection};

use crate::parsing::{parse_bool_property, parse_lat_lng_str, parse_socrata_date};

/// Category assigned to case rows without a `source` value.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// Converts a feature's geometry to a [`geo::Geometry`].
fn feature_geometry(feature: &Feature) -> Option<Geometry<f64>> {
    let geometry = feature.geometry.as_ref()?;
    Geometry::<f64>::try_from(geometry.clone()).ok()
}

/// Collects every feature geometry of the basemap into one collection, the
/// reference the projection is fitted to.
#[must_use]
pub fn basemap_geometry(collection: &FeatureCollection) -> GeometryCollection<f64> {
    GeometryCollection(
        collection
            .features
            .iter()
            .filter_map(feature_geometry)
            .collect(),
    )
}

/// Normalizes basemap features into regions.
///
/// Skips features with a missing or blank `name_field` property or a
/// non-polygonal geometry.
#[must_use]
pub fn normalize_regions(collection: &FeatureCollection, name_field: &str) -> Vec<Region> {
    let regions: Vec<Region> = collection
        .features
        .iter()
        .filter_map(|feature| normalize_region(feature, name_field))
        .collect();

    let skipped = collection.features.len() - regions.len();
    if skipped > 0 {
        log::warn!("Skipped {skipped} basemap features without a name or polygon geometry");
    }
    regions
}

fn normalize_region(feature: &Feature, name_field: &str) -> Option<Region> {
    let name = feature
        .property(name_field)
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())?
        .to_string();

    let geometry = match feature_geometry(feature)? {
        Geometry::MultiPolygon(mp) => mp,
        Geometry::Polygon(p) => MultiPolygon(vec![p]),
        _ => return None,
    };

    Some(Region { name, geometry })
}

/// Normalizes street features into segments.
///
/// A missing or unreadable `active_field` is treated as inactive.
/// Non-linear geometries are skipped.
#[must_use]
pub fn normalize_streets(collection: &FeatureCollection, active_field: &str) -> Vec<StreetSegment> {
    collection
        .features
        .iter()
        .filter_map(|feature| {
            let geometry = match feature_geometry(feature)? {
                Geometry::MultiLineString(ml) => ml,
                Geometry::LineString(l) => MultiLineString(vec![l]),
                _ => return None,
            };
            let active = parse_bool_property(feature.property(active_field)).unwrap_or(false);
            Some(StreetSegment { geometry, active })
        })
        .collect()
}

/// Normalizes raw case rows, projecting each to screen space.
///
/// Rows whose coordinates are missing, unparseable, or do not project to a
/// finite point are dropped.
#[must_use]
pub fn normalize_cases(records: Vec<CaseRecord>, projection: &ConicEqualArea) -> Vec<CaseEvent> {
    let raw_count = records.len();
    let events: Vec<CaseEvent> = records
        .into_iter()
        .filter_map(|record| normalize_case(record, projection))
        .collect();

    if events.len() < raw_count {
        log::warn!(
            "Dropped {} case records with unusable coordinates",
            raw_count - events.len()
        );
    }
    log::info!(
        "Normalized {} cases from {} raw records",
        events.len(),
        raw_count
    );
    events
}

/// Normalizes a single case row.
#[must_use]
pub fn normalize_case(record: CaseRecord, projection: &ConicEqualArea) -> Option<CaseEvent> {
    let (latitude, longitude) = parse_lat_lng_str(record.lat.as_deref(), record.long.as_deref())?;
    let Some((x, y)) = projection.project(longitude, latitude) else {
        log::debug!("Case at ({longitude}, {latitude}) did not project");
        return None;
    };

    let requested_at = record
        .requested_datetime
        .as_deref()
        .and_then(parse_socrata_date);

    Some(CaseEvent {
        service_request_id: record.service_request_id,
        requested_datetime: record.requested_datetime,
        requested_at,
        status_description: record.status_description,
        neighborhood: record.neighborhoods_sffind_boundaries,
        service_subtype: record.service_subtype,
        service_details: record.service_details,
        source: record
            .source
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
        longitude,
        latitude,
        x,
        y,
        radius: CASE_RADIUS,
        collided: false,
    })
}
