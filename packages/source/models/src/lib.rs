#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map dataset definition types.
//!
//! A [`DatasetDefinition`] describes the three remote layers that make up a
//! case map (basemap polygons, street lines, case points), the filters
//! applied to the case query, and the viewport the map is fitted to.
//! Definitions are TOML files embedded at compile time.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// The three remote datasets a map is assembled from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DatasetKind {
    /// Neighborhood boundary polygons
    Basemap,
    /// Street centerline segments
    Streets,
    /// Service request points
    Cases,
}

/// A complete map dataset definition, deserialized from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetDefinition {
    /// Unique identifier (e.g., `"sf_street_cleaning"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Size of the map the projection is fitted to.
    pub viewport: Viewport,
    /// Projection parameters.
    pub projection: ProjectionConfig,
    pub basemap: BasemapConfig,
    pub streets: StreetsConfig,
    pub cases: CasesConfig,
}

/// Map size in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Returns `[width, height]` as floats for projection fitting.
    #[must_use]
    pub fn size(self) -> [f64; 2] {
        [f64::from(self.width), f64::from(self.height)]
    }
}

/// Conic equal-area projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Standard parallels in degrees.
    pub parallels: [f64; 2],
    /// Longitude rotation in degrees.
    pub rotate: f64,
}

/// Where to fetch neighborhood polygons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasemapConfig {
    /// `GeoJSON` resource URL.
    pub url: String,
    /// Feature property holding the neighborhood name.
    #[serde(default = "default_name_field")]
    pub name_field: String,
}

fn default_name_field() -> String {
    "nhood".to_string()
}

/// Where to fetch street segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetsConfig {
    /// `GeoJSON` resource URL.
    pub url: String,
    /// `$limit` row cap.
    pub limit: u32,
    /// Feature property flagging a segment as in service.
    #[serde(default = "default_active_field")]
    pub active_field: String,
}

fn default_active_field() -> String {
    "active".to_string()
}

/// Where to fetch service requests and how to filter them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasesConfig {
    /// JSON resource URL.
    pub url: String,
    /// Only requests whose `service_name` starts with this prefix.
    pub service_name_prefix: String,
    /// Only requests whose `status_description` starts with this prefix.
    pub status_prefix: String,
    /// Timestamp column the date window applies to.
    #[serde(default = "default_date_column")]
    pub date_column: String,
    pub window: DateWindow,
}

fn default_date_column() -> String {
    "requested_datetime".to_string()
}

/// A request date window, truncated to whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Start of the window at midnight.
    #[must_use]
    pub fn start_datetime(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// End of the window at midnight.
    #[must_use]
    pub fn end_datetime(&self) -> NaiveDateTime {
        self.end.and_time(NaiveTime::MIN)
    }
}
