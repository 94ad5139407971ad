#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Domain types for the street cleaning case map.
//!
//! Three datasets feed the map: neighborhood [`Region`] polygons, street
//! [`StreetSegment`] lines, and point [`CaseEvent`]s (311 service requests).
//! Records here carry no rendering handles; the render layer maps
//! [`RegionId`]/[`CaseId`] indices to its own element ids.

use chrono::NaiveDateTime;
use geo::{MultiLineString, MultiPolygon};
use serde::{Deserialize, Serialize};

/// Display radius of every case marker, in screen pixels.
pub const CASE_RADIUS: f64 = 5.0;

/// Index of a [`Region`] within the loaded basemap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionId(pub usize);

/// Index of a [`CaseEvent`] within the loaded case collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CaseId(pub usize);

/// A raw service request as returned by the Socrata cases endpoint.
///
/// Socrata serializes every column as a string, so numeric fields such as
/// `lat`/`long` arrive as text and are parsed during normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    #[serde(default)]
    pub service_request_id: Option<String>,
    #[serde(default)]
    pub requested_datetime: Option<String>,
    #[serde(default)]
    pub status_description: Option<String>,
    #[serde(default)]
    pub neighborhoods_sffind_boundaries: Option<String>,
    #[serde(default)]
    pub service_subtype: Option<String>,
    #[serde(default)]
    pub service_details: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub lat: Option<String>,
    #[serde(default)]
    pub long: Option<String>,
}

/// A normalized service request with its projected screen position.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseEvent {
    /// Socrata request id, when present.
    pub service_request_id: Option<String>,
    /// Raw `requested_datetime` text from the source.
    pub requested_datetime: Option<String>,
    /// Parsed request timestamp. `None` when missing or unparseable.
    pub requested_at: Option<NaiveDateTime>,
    pub status_description: Option<String>,
    /// Neighborhood name (`neighborhoods_sffind_boundaries`).
    pub neighborhood: Option<String>,
    pub service_subtype: Option<String>,
    pub service_details: Option<String>,
    /// Reporting channel (e.g. "Phone", "Mobile/Open311"). Drives the
    /// legend and the category filter.
    pub source: String,
    pub longitude: f64,
    pub latitude: f64,
    /// Projected screen x.
    pub x: f64,
    /// Projected screen y.
    pub y: f64,
    /// Marker radius.
    pub radius: f64,
    /// Reserved for collision-based radius growth, which is not
    /// implemented. Always `false`.
    pub collided: bool,
}

impl CaseEvent {
    /// Returns `true` if this case was reported through `category`.
    #[must_use]
    pub fn is_category(&self, category: &str) -> bool {
        self.source == category
    }
}

/// A neighborhood polygon from the basemap.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Neighborhood name (the `nhood` property).
    pub name: String,
    pub geometry: MultiPolygon<f64>,
}

/// A street centerline segment.
#[derive(Debug, Clone, PartialEq)]
pub struct StreetSegment {
    pub geometry: MultiLineString<f64>,
    /// Inactive (retired) segments are never drawn.
    pub active: bool,
}

/// Distinct case categories in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySet {
    categories: Vec<String>,
}

impl CategorySet {
    /// Collects the distinct `source` values of `events`, preserving the
    /// order in which each first appears.
    #[must_use]
    pub fn from_events(events: &[CaseEvent]) -> Self {
        let mut set = Self::default();
        for event in events {
            set.insert(&event.source);
        }
        set
    }

    /// Adds `category` if it has not been seen. Returns its index.
    pub fn insert(&mut self, category: &str) -> usize {
        if let Some(index) = self.index_of(category) {
            return index;
        }
        self.categories.push(category.to_string());
        self.categories.len() - 1
    }

    /// First-seen position of `category`.
    #[must_use]
    pub fn index_of(&self, category: &str) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(source: &str) -> CaseEvent {
        CaseEvent {
            service_request_id: None,
            requested_datetime: None,
            requested_at: None,
            status_description: None,
            neighborhood: None,
            service_subtype: None,
            service_details: None,
            source: source.to_string(),
            longitude: -122.4,
            latitude: 37.77,
            x: 0.0,
            y: 0.0,
            radius: CASE_RADIUS,
            collided: false,
        }
    }

    #[test]
    fn category_set_keeps_first_seen_order() {
        let events = vec![
            event("Phone"),
            event("Mobile/Open311"),
            event("Phone"),
            event("Web"),
            event("Mobile/Open311"),
        ];
        let set = CategorySet::from_events(&events);
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec!["Phone", "Mobile/Open311", "Web"]
        );
        assert_eq!(set.index_of("Web"), Some(2));
        assert_eq!(set.index_of("Twitter"), None);
    }

    #[test]
    fn empty_events_give_empty_set() {
        let set = CategorySet::from_events(&[]);
        assert!(set.is_empty());
        assert_eq!(set.iter().next(), None);
    }

    #[test]
    fn deserializes_socrata_record_with_missing_fields() {
        let record: CaseRecord = serde_json::from_str(
            r#"{"requested_datetime":"2020-03-15T10:00:00.000","source":"Phone","lat":"37.77","long":"-122.41"}"#,
        )
        .unwrap();
        assert_eq!(record.source.as_deref(), Some("Phone"));
        assert_eq!(record.lat.as_deref(), Some("37.77"));
        assert!(record.service_details.is_none());
    }
}
